use super::super::{AnalysisConfig, ObservabilityConfig, RubricConfig, TrainingConfig};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub rubric: RubricConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub training: TrainingConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate()?;
        self.observability.validate()?;
        Ok(())
    }
}
