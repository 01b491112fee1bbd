use crate::persona::Difficulty;
use crate::roleplay::TrainingMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_PERSONA_DIR: &str = "personas";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Directory of persona JSON files. Relative to the working directory
    /// when unset.
    #[serde(default)]
    pub persona_dir: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub mode: TrainingMode,
}

impl TrainingConfig {
    pub fn persona_dir(&self) -> PathBuf {
        PathBuf::from(self.persona_dir.as_deref().unwrap_or(DEFAULT_PERSONA_DIR))
    }
}
