use crate::rubric::{ScoreTotals, TurnScore};
use crate::transcript::{ExtractedTurn, Transcript};
use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FeedbackKind {
    Strength,
    Improvement,
    Critical,
}

/// Coaching note pinned to the moment the agent started speaking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimestampedFeedback {
    pub timestamp: f64,
    /// 1-based.
    pub turn_number: usize,
    pub kind: FeedbackKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_technique: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissedOpportunity {
    pub timestamp: f64,
    pub context: String,
    pub suggestion: String,
    pub example: String,
}

impl MissedOpportunity {
    pub fn timestamp_label(&self) -> String {
        format!("{:.1}s", self.timestamp)
    }
}

/// An extracted turn together with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTurn {
    #[serde(flatten)]
    pub turn: ExtractedTurn,
    pub score: TurnScore,
}

/// Coaching report for one analysed call. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallReport {
    pub generated_at: DateTime<Utc>,
    pub transcript: Transcript,
    pub turns: Vec<ScoredTurn>,
    pub totals: ScoreTotals,
    pub timestamped_feedback: Vec<TimestampedFeedback>,
    pub key_wins: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub technique_recommendations: Vec<String>,
    pub missed_opportunities: Vec<MissedOpportunity>,
}

impl CallReport {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
