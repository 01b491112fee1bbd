use crate::error::PersonaError;
use crate::utils::text::title_case;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use strum::{Display, EnumString};

/// How many of a persona's objections are in play.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    Beginner,
    #[default]
    Medium,
    Advanced,
}

impl Difficulty {
    /// `None` means every objection.
    pub fn objection_limit(self) -> Option<usize> {
        match self {
            Self::Beginner => Some(2),
            Self::Medium => Some(4),
            Self::Advanced => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tone {
    pub formality: String,
    pub energy: String,
    pub pace_wpm: u32,
    pub directness: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectionPattern {
    pub name: String,
    pub trigger_phrases: Vec<String>,
    #[serde(default)]
    pub emotion: String,
    #[serde(default)]
    pub response_playbook: Vec<String>,
    #[serde(default)]
    pub evidence: Vec<String>,
    #[serde(default)]
    pub magic_phrases: Vec<String>,
}

impl ObjectionPattern {
    /// The phrase a scripted counterpart voices when raising this objection.
    pub fn opening_line(&self) -> &str {
        self.trigger_phrases
            .first()
            .map_or(self.name.as_str(), String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationRules {
    #[serde(default)]
    pub handoff_if: Vec<String>,
    #[serde(default)]
    pub handoff_target: Option<String>,
}

/// Immutable description of a simulated counterpart. Session state lives in
/// [`SessionState`](super::SessionState).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaDefinition {
    pub id: String,
    pub label: String,
    pub tone: Tone,
    #[serde(default)]
    pub persona_traits: Vec<String>,
    #[serde(default)]
    pub context: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub goals: Vec<String>,
    pub objection_patterns: Vec<ObjectionPattern>,
    #[serde(default)]
    pub knowledge_snippets: Vec<String>,
    #[serde(default)]
    pub escalation_rules: EscalationRules,
}

impl PersonaDefinition {
    pub fn from_json_str(raw: &str, origin: &str) -> Result<Self, PersonaError> {
        let persona: Self = serde_json::from_str(raw).map_err(|e| PersonaError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        persona.validate()?;
        Ok(persona)
    }

    pub fn load(path: &Path) -> Result<Self, PersonaError> {
        let origin = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|e| PersonaError::Read {
            path: origin.clone(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&raw, &origin)
    }

    pub fn validate(&self) -> Result<(), PersonaError> {
        let invalid = |message: &str| PersonaError::Invalid {
            id: self.id.clone(),
            message: message.to_string(),
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id must not be empty"));
        }
        if self.label.trim().is_empty() {
            return Err(invalid("label must not be empty"));
        }
        for objection in &self.objection_patterns {
            if objection.name.trim().is_empty() {
                return Err(invalid("objection name must not be empty"));
            }
            if objection.trigger_phrases.is_empty() {
                return Err(invalid(&format!(
                    "objection `{}` needs at least one trigger phrase",
                    objection.name
                )));
            }
        }
        Ok(())
    }

    /// Beginner sees the first 2 objections, medium the first 4, advanced all.
    pub fn objections_for(&self, difficulty: Difficulty) -> &[ObjectionPattern] {
        let count = difficulty
            .objection_limit()
            .map_or(self.objection_patterns.len(), |limit| {
                limit.min(self.objection_patterns.len())
            });
        &self.objection_patterns[..count]
    }

    pub fn suggested_magic_phrases(&self, objection_name: &str) -> &[String] {
        self.objection_patterns
            .iter()
            .find(|objection| objection.name == objection_name)
            .map(|objection| objection.magic_phrases.as_slice())
            .unwrap_or_default()
    }

    /// Situation entries with `snake_case` keys turned into titles.
    pub fn context_entries(&self) -> Vec<(String, String)> {
        self.context
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                (title_case(key), value)
            })
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::investor;
    use super::*;

    #[test]
    fn objections_scale_with_difficulty() {
        let persona = investor();
        assert_eq!(persona.objections_for(Difficulty::Beginner).len(), 2);
        assert_eq!(persona.objections_for(Difficulty::Medium).len(), 4);
        assert_eq!(persona.objections_for(Difficulty::Advanced).len(), 5);
    }

    #[test]
    fn objection_limit_never_exceeds_available() {
        let mut persona = investor();
        persona.objection_patterns.truncate(1);
        assert_eq!(persona.objections_for(Difficulty::Medium).len(), 1);
    }

    #[test]
    fn magic_phrases_by_objection_name() {
        let persona = investor();
        assert_eq!(persona.suggested_magic_phrases("price").len(), 1);
        assert!(persona.suggested_magic_phrases("unknown").is_empty());
    }

    #[test]
    fn context_keys_become_titles() {
        let entries = investor().context_entries();
        assert_eq!(
            entries,
            vec![
                ("Budget Range".to_string(), "$400k-$600k".to_string()),
                ("Properties Owned".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn blank_id_is_invalid() {
        let mut persona = investor();
        persona.id = " ".into();
        assert!(matches!(
            persona.validate(),
            Err(PersonaError::Invalid { .. })
        ));
    }

    #[test]
    fn malformed_json_names_origin() {
        let err = PersonaDefinition::from_json_str("{", "broken.json").unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Advanced".parse::<Difficulty>().unwrap(), Difficulty::Advanced);
        assert_eq!(Difficulty::Beginner.to_string(), "beginner");
        assert!("expert".parse::<Difficulty>().is_err());
    }
}
