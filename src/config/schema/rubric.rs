use crate::error::RubricError;
use crate::rubric::{RubricScorer, RubricVocabulary};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RubricConfig {
    /// External rubric vocabulary (TOML). The embedded vocabulary is used
    /// when unset.
    #[serde(default)]
    pub path: Option<String>,
}

impl RubricConfig {
    pub fn vocabulary(&self) -> Result<RubricVocabulary, RubricError> {
        match self.path.as_deref() {
            Some(path) => RubricVocabulary::load(Path::new(path)),
            None => RubricVocabulary::builtin(),
        }
    }

    pub fn scorer(&self) -> Result<RubricScorer, RubricError> {
        RubricScorer::new(&self.vocabulary()?)
    }
}
