use super::grading::{DimensionAverages, ScoreTotals, rapport_breaker_count};
use super::scorer::RubricScorer;
use super::types::TurnScore;
use serde::Serialize;

/// Scores for a whole conversation plus coaching lines about it as a whole.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationScore {
    pub turns: Vec<TurnScore>,
    pub overall_feedback: Vec<String>,
}

impl ConversationScore {
    pub fn totals(&self) -> Option<ScoreTotals> {
        ScoreTotals::from_scores(&self.turns)
    }
}

impl RubricScorer {
    /// Score `(agent, counterpart)` pairs in order. The counterpart text is
    /// passed as each turn's context.
    pub fn score_conversation(&self, turns: &[(String, String)]) -> ConversationScore {
        let scores: Vec<TurnScore> = turns
            .iter()
            .map(|(agent, counterpart)| self.score(agent, Some(counterpart)))
            .collect();
        let overall_feedback = overall_feedback(&scores);
        ConversationScore {
            turns: scores,
            overall_feedback,
        }
    }
}

fn overall_feedback(scores: &[TurnScore]) -> Vec<String> {
    let (Some(totals), Some(averages)) = (
        ScoreTotals::from_scores(scores),
        DimensionAverages::from_scores(scores),
    ) else {
        return vec!["No turns scored yet".to_string()];
    };

    let mut feedback = vec![totals.headline()];

    let mut strengths = Vec::new();
    if averages.acknowledge_affirm >= 2.5 {
        strengths.push("Excellent at acknowledging and affirming");
    }
    if averages.isolate >= 2.5 {
        strengths.push("Strong isolation skills");
    }
    if !strengths.is_empty() {
        feedback.push(format!("✓ Strengths: {}", strengths.join(", ")));
    }

    let mut improvements = Vec::new();
    if averages.acknowledge_affirm < 2.0 {
        improvements.push("Work on acknowledging client concerns first".to_string());
    }
    if averages.isolate < 2.0 {
        improvements.push("Practice isolation questions more".to_string());
    }
    let breakers = rapport_breaker_count(scores);
    if breakers > 0 {
        improvements.push(format!("Avoid rapport breakers ({breakers} detected)"));
    }
    if !improvements.is_empty() {
        feedback.push(format!("⚠️ Areas to improve: {}", improvements.join(", ")));
    }

    if scores
        .iter()
        .all(|score| score.techniques_detected().is_empty())
    {
        feedback.push(
            "💡 Try using: Feel-Felt-Found, Has There Ever Been, or Level Shift techniques".into(),
        );
    }

    feedback
}
