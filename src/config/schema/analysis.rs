use crate::error::ConfigError;
use crate::report::builder::{DEFAULT_CONTEXT_EXCERPT_CHARS, DEFAULT_MAX_MISSED_OPPORTUNITIES};
use crate::transcript::DEFAULT_AGENT_KEYWORDS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Phrases that mark a segment as agent speech during speaker labelling.
    #[serde(default = "default_agent_keywords")]
    pub agent_keywords: Vec<String>,
    #[serde(default = "default_max_missed_opportunities")]
    pub max_missed_opportunities: usize,
    #[serde(default = "default_context_excerpt_chars")]
    pub context_excerpt_chars: usize,
}

fn default_agent_keywords() -> Vec<String> {
    DEFAULT_AGENT_KEYWORDS
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_max_missed_opportunities() -> usize {
    DEFAULT_MAX_MISSED_OPPORTUNITIES
}

fn default_context_excerpt_chars() -> usize {
    DEFAULT_CONTEXT_EXCERPT_CHARS
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            agent_keywords: default_agent_keywords(),
            max_missed_opportunities: default_max_missed_opportunities(),
            context_excerpt_chars: default_context_excerpt_chars(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_missed_opportunities == 0 {
            return Err(ConfigError::Validation(
                "analysis.max_missed_opportunities must be at least 1".into(),
            ));
        }
        if self.context_excerpt_chars == 0 {
            return Err(ConfigError::Validation(
                "analysis.context_excerpt_chars must be at least 1".into(),
            ));
        }
        if self
            .agent_keywords
            .iter()
            .all(|keyword| keyword.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "analysis.agent_keywords must contain at least one phrase".into(),
            ));
        }
        Ok(())
    }
}
