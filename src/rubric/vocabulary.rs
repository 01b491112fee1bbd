use crate::error::RubricError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BUILTIN_RUBRIC: &str = include_str!("../../data/rubric.toml");

/// The rubric's vocabulary: every phrase list and pattern the scorer matches
/// against. Loaded once, validated, then compiled into a
/// [`RubricScorer`](super::RubricScorer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricVocabulary {
    pub acknowledgements: Vec<String>,
    pub isolation_patterns: Vec<String>,
    pub closing_patterns: Vec<String>,
    pub handling: HandlingVocabulary,
    pub rapport_breakers: Vec<RapportBreakerRule>,
    pub magic_phrases: Vec<MagicPhraseTemplate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlingVocabulary {
    pub feel_felt_found: String,
    pub has_there_ever_been: String,
    pub level_shift_phrases: Vec<String>,
}

/// A negative pattern. A match is ignored when the text right after it starts
/// with `unless_followed_by` ("i understand" vs "i understand your concern").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RapportBreakerRule {
    pub pattern: String,
    #[serde(default)]
    pub unless_followed_by: Option<String>,
    pub message: String,
}

/// A named phrase template. Detection cues are matched as whole words; when
/// `keywords` is empty the first three whitespace tokens of `pattern` are used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicPhraseTemplate {
    pub key: String,
    pub name: String,
    pub pattern: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl MagicPhraseTemplate {
    pub fn keywords(&self) -> Vec<String> {
        if !self.keywords.is_empty() {
            return self.keywords.iter().map(|keyword| keyword.to_lowercase()).collect();
        }
        self.pattern
            .to_lowercase()
            .split_whitespace()
            .take(3)
            .map(ToString::to_string)
            .collect()
    }
}

impl RubricVocabulary {
    /// The vocabulary shipped with the crate.
    pub fn builtin() -> Result<Self, RubricError> {
        Self::from_toml_str(BUILTIN_RUBRIC)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, RubricError> {
        let vocabulary: Self = toml::from_str(raw)?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    pub fn load(path: &Path) -> Result<Self, RubricError> {
        let raw = fs::read_to_string(path).map_err(|source| RubricError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Reject empty lists and blank entries. Pattern syntax is checked when
    /// the scorer compiles the vocabulary.
    pub fn validate(&self) -> Result<(), RubricError> {
        require_entries("acknowledgements", &self.acknowledgements)?;
        require_entries("isolation_patterns", &self.isolation_patterns)?;
        require_entries("closing_patterns", &self.closing_patterns)?;
        require_text("handling.feel_felt_found", &self.handling.feel_felt_found)?;
        require_text(
            "handling.has_there_ever_been",
            &self.handling.has_there_ever_been,
        )?;
        require_entries(
            "handling.level_shift_phrases",
            &self.handling.level_shift_phrases,
        )?;

        if self.rapport_breakers.is_empty() {
            return Err(empty("rapport_breakers"));
        }
        for rule in &self.rapport_breakers {
            require_text("rapport_breakers.pattern", &rule.pattern)?;
            require_text("rapport_breakers.message", &rule.message)?;
        }

        if self.magic_phrases.is_empty() {
            return Err(empty("magic_phrases"));
        }
        for template in &self.magic_phrases {
            require_text("magic_phrases.key", &template.key)?;
            require_text("magic_phrases.name", &template.name)?;
            require_text("magic_phrases.pattern", &template.pattern)?;
            for keyword in &template.keywords {
                require_text("magic_phrases.keywords", keyword)?;
            }
        }

        Ok(())
    }
}

fn empty(field: &str) -> RubricError {
    RubricError::Empty {
        field: field.to_string(),
    }
}

fn require_text(field: &str, value: &str) -> Result<(), RubricError> {
    if value.trim().is_empty() {
        return Err(empty(field));
    }
    Ok(())
}

fn require_entries(field: &str, values: &[String]) -> Result<(), RubricError> {
    if values.is_empty() {
        return Err(empty(field));
    }
    for value in values {
        require_text(field, value)?;
    }
    Ok(())
}
