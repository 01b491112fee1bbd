mod builder;
mod engine;

pub use builder::build_persona_prompt;
pub use engine::TeraEngine;
