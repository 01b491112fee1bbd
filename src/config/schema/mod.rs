mod analysis;
mod core;
mod observability;
mod rubric;
mod training;

pub use analysis::AnalysisConfig;
pub use core::Config;
pub use observability::ObservabilityConfig;
pub use rubric::RubricConfig;
pub use training::TrainingConfig;
