use crate::rubric::{Dimension, DimensionAverages, ScoreTotals, TurnScore, rapport_breaker_count};
use serde::Serialize;

/// Read-only view over a session's turn history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    #[serde(flatten)]
    pub totals: ScoreTotals,
    pub averages: DimensionAverages,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub rapport_breakers: usize,
}

/// Append-only history of turn scores for one live session.
///
/// Not synchronized: one aggregator per session, driven by one caller.
#[derive(Debug, Clone, Default)]
pub struct SessionAggregator {
    scores: Vec<TurnScore>,
}

impl SessionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, score: TurnScore) {
        self.scores.push(score);
    }

    pub fn scores(&self) -> &[TurnScore] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Recomputed from the full history on every call. `None` means no turns
    /// have been recorded yet.
    pub fn summary(&self) -> Option<SessionSummary> {
        let totals = ScoreTotals::from_scores(&self.scores)?;
        let averages = DimensionAverages::from_scores(&self.scores)?;

        let mut strengths = Vec::new();
        let mut improvements = Vec::new();
        for dimension in Dimension::ALL {
            let average = averages.get(dimension);
            if average >= dimension.strength_threshold() {
                strengths.push(strength_line(dimension).to_string());
            } else if average < dimension.improvement_threshold() {
                improvements.push(improvement_line(dimension).to_string());
            }
        }

        let rapport_breakers = rapport_breaker_count(&self.scores);
        if rapport_breakers > 0 {
            improvements.push(format!("Avoid rapport breakers ({rapport_breakers} detected)"));
        }

        Some(SessionSummary {
            totals,
            averages,
            strengths,
            improvements,
            rapport_breakers,
        })
    }

    pub fn reset(&mut self) {
        self.scores.clear();
    }
}

fn strength_line(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::AcknowledgeAffirm => "Excellent acknowledgement skills",
        Dimension::Isolate => "Strong objection isolation",
        Dimension::Handle => "Good use of handling techniques",
        Dimension::Close => "Consistent closing questions",
    }
}

fn improvement_line(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::AcknowledgeAffirm => {
            "Work on acknowledgement (start with 'Perfect', 'I appreciate that')"
        }
        Dimension::Isolate => "Practice isolation questions",
        Dimension::Handle => "Try Feel-Felt-Found or Has There Ever Been techniques",
        Dimension::Close => "End each response with a close ('Does that make sense?')",
    }
}
