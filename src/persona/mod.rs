//! Simulated counterparts: immutable persona definitions and the mutable
//! state of one practice session.

pub mod definition;
pub mod library;
pub mod state;

pub use definition::{Difficulty, EscalationRules, ObjectionPattern, PersonaDefinition, Tone};
pub use library::{PersonaEntry, list_personas, resolve_persona};
pub use state::SessionState;
