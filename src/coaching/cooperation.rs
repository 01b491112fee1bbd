use crate::rubric::MAX_TURN_SCORE;
use serde::Serialize;
use strum::Display;
use tracing::debug;

pub const MIN_COOPERATION: u8 = 0;
pub const MAX_COOPERATION: u8 = 10;
pub const INITIAL_COOPERATION: u8 = 5;

/// How the simulated counterpart should behave on its next reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Directive {
    Resistant,
    Cautious,
    Cooperative,
}

impl Directive {
    /// Banding of a cooperation value: <4 resistant, 4..=6 cautious, >=7
    /// cooperative.
    pub fn from_cooperation(cooperation: u8) -> Self {
        match cooperation {
            0..=3 => Self::Resistant,
            4..=6 => Self::Cautious,
            _ => Self::Cooperative,
        }
    }

    /// Behavioral instruction fed into the counterpart's prompt.
    pub fn instruction(self) -> &'static str {
        match self {
            Self::Resistant => "You are resistant and skeptical. Push back on suggestions.",
            Self::Cautious => "You are cautiously interested. Need convincing.",
            Self::Cooperative => "You are cooperative and ready to move forward.",
        }
    }
}

/// Cooperation level of a simulated counterpart, 0..=10.
///
/// [`adjust`](Self::adjust) is the only mutator besides [`reset`](Self::reset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooperationModel {
    level: u8,
}

impl Default for CooperationModel {
    fn default() -> Self {
        Self::new()
    }
}

impl CooperationModel {
    pub fn new() -> Self {
        Self {
            level: INITIAL_COOPERATION,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn directive(&self) -> Directive {
        Directive::from_cooperation(self.level)
    }

    /// Move cooperation in response to a scored turn and return the new
    /// level. `turn_total` is clamped to `0..=11` before banding.
    pub fn adjust(&mut self, turn_total: i64) -> u8 {
        let total = turn_total.clamp(0, i64::from(MAX_TURN_SCORE));
        let from = self.level;
        self.level = match total {
            8.. => from.saturating_add(2).min(MAX_COOPERATION),
            5..8 => from.saturating_add(1).min(MAX_COOPERATION),
            ..3 => from.saturating_sub(2),
            _ => from.saturating_sub(1),
        };
        debug!(from, to = self.level, turn_total = total, "cooperation.adjusted");
        self.level
    }

    pub fn reset(&mut self) {
        self.level = INITIAL_COOPERATION;
    }
}
