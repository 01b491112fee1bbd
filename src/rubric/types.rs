use serde::Serialize;
use strum::Display;

pub const MAX_ACKNOWLEDGE_AFFIRM: u8 = 3;
pub const MAX_ISOLATE: u8 = 3;
pub const MAX_HANDLE: u8 = 3;
pub const MAX_CLOSE: u8 = 2;

/// Highest total a single turn can reach (3 + 3 + 3 + 2).
pub const MAX_TURN_SCORE: u32 = 11;

/// Named handling techniques the rubric recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Technique {
    #[strum(serialize = "Feel-Felt-Found")]
    FeelFeltFound,
    #[strum(serialize = "Has There Ever Been")]
    HasThereEverBeen,
    #[strum(serialize = "Level Shift")]
    LevelShift,
    #[strum(serialize = "Embedded Command")]
    EmbeddedCommand,
}

/// Raw per-dimension points before they are bounded into a [`TurnScore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubScores {
    pub acknowledge_affirm: u8,
    pub isolate: u8,
    pub handle: u8,
    pub close: u8,
}

/// Score of one agent utterance. Immutable once built; `total` is always
/// derived from the four sub-scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnScore {
    acknowledge_affirm: u8,
    isolate: u8,
    handle: u8,
    close: u8,
    magic_phrases_used: Vec<String>,
    techniques_detected: Vec<Technique>,
    rapport_breakers: Vec<String>,
    feedback: Vec<String>,
}

impl TurnScore {
    /// Each sub-score is clamped to its dimension's range.
    pub fn from_sub_scores(sub: SubScores) -> Self {
        Self {
            acknowledge_affirm: sub.acknowledge_affirm.min(MAX_ACKNOWLEDGE_AFFIRM),
            isolate: sub.isolate.min(MAX_ISOLATE),
            handle: sub.handle.min(MAX_HANDLE),
            close: sub.close.min(MAX_CLOSE),
            magic_phrases_used: Vec::new(),
            techniques_detected: Vec::new(),
            rapport_breakers: Vec::new(),
            feedback: Vec::new(),
        }
    }

    pub fn with_magic_phrases(mut self, names: Vec<String>) -> Self {
        self.magic_phrases_used = names;
        self
    }

    pub fn with_techniques(mut self, techniques: Vec<Technique>) -> Self {
        self.techniques_detected = techniques;
        self
    }

    pub fn with_rapport_breakers(mut self, breakers: Vec<String>) -> Self {
        self.rapport_breakers = breakers;
        self
    }

    pub fn with_feedback(mut self, feedback: Vec<String>) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn acknowledge_affirm(&self) -> u8 {
        self.acknowledge_affirm
    }

    pub fn isolate(&self) -> u8 {
        self.isolate
    }

    pub fn handle(&self) -> u8 {
        self.handle
    }

    pub fn close(&self) -> u8 {
        self.close
    }

    pub fn total(&self) -> u32 {
        u32::from(self.acknowledge_affirm)
            + u32::from(self.isolate)
            + u32::from(self.handle)
            + u32::from(self.close)
    }

    pub fn max_score(&self) -> u32 {
        MAX_TURN_SCORE
    }

    pub fn magic_phrases_used(&self) -> &[String] {
        &self.magic_phrases_used
    }

    pub fn techniques_detected(&self) -> &[Technique] {
        &self.techniques_detected
    }

    pub fn uses_technique(&self, technique: Technique) -> bool {
        self.techniques_detected.contains(&technique)
    }

    pub fn rapport_breakers(&self) -> &[String] {
        &self.rapport_breakers
    }

    pub fn feedback(&self) -> &[String] {
        &self.feedback
    }
}
