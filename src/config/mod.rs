pub mod schema;

pub use schema::{AnalysisConfig, Config, ObservabilityConfig, RubricConfig, TrainingConfig};
