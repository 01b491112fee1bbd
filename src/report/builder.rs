use super::types::{CallReport, FeedbackKind, MissedOpportunity, ScoredTurn, TimestampedFeedback};
use crate::config::AnalysisConfig;
use crate::rubric::{
    Dimension, DimensionAverages, ScoreTotals, Technique, TurnScore, rapport_breaker_count,
};
use crate::transcript::Transcript;
use crate::utils::text::truncate_with_ellipsis;
use chrono::Utc;
use std::collections::HashSet;

pub const DEFAULT_MAX_MISSED_OPPORTUNITIES: usize = 5;
pub const DEFAULT_CONTEXT_EXCERPT_CHARS: usize = 50;

const STRONG_TURN_TOTAL: u32 = 8;
const EXCELLENT_TURN_TOTAL: u32 = 9;

/// Assembles a [`CallReport`] from scored turns. Pure apart from the
/// generation timestamp.
#[derive(Debug, Clone)]
pub struct CallReportBuilder {
    max_missed_opportunities: usize,
    context_excerpt_chars: usize,
}

impl Default for CallReportBuilder {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_MISSED_OPPORTUNITIES,
            DEFAULT_CONTEXT_EXCERPT_CHARS,
        )
    }
}

impl CallReportBuilder {
    pub fn new(max_missed_opportunities: usize, context_excerpt_chars: usize) -> Self {
        Self {
            max_missed_opportunities,
            context_excerpt_chars,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(
            config.max_missed_opportunities,
            config.context_excerpt_chars,
        )
    }

    /// `None` when there are no turns to report on.
    pub fn build(&self, transcript: Transcript, turns: Vec<ScoredTurn>) -> Option<CallReport> {
        let scores: Vec<TurnScore> = turns.iter().map(|turn| turn.score.clone()).collect();
        let totals = ScoreTotals::from_scores(&scores)?;
        let averages = DimensionAverages::from_scores(&scores)?;

        Some(CallReport {
            generated_at: Utc::now(),
            timestamped_feedback: timestamped_feedback(&turns),
            key_wins: key_wins(&scores, &averages),
            improvement_areas: improvement_areas(&scores, &averages),
            technique_recommendations: technique_recommendations(&scores),
            missed_opportunities: self.missed_opportunities(&turns),
            transcript,
            turns,
            totals,
        })
    }

    fn missed_opportunities(&self, turns: &[ScoredTurn]) -> Vec<MissedOpportunity> {
        let mut found = Vec::new();
        for scored in turns {
            let timestamp = scored.turn.agent_start;
            let counterpart = scored.turn.counterpart_text.as_str();

            if scored.score.isolate() == 0 && !counterpart.is_empty() {
                found.push(MissedOpportunity {
                    timestamp,
                    context: format!(
                        "Client said: '{}'",
                        truncate_with_ellipsis(counterpart, self.context_excerpt_chars)
                    ),
                    suggestion: "Isolate the objection".into(),
                    example: "Besides that, is there any other reason you wouldn't move forward?"
                        .into(),
                });
            }

            if scored.score.acknowledge_affirm() == 0 {
                found.push(MissedOpportunity {
                    timestamp,
                    context: "Response started without acknowledgement".into(),
                    suggestion: "Start with acknowledgement term".into(),
                    example: "Perfect! I can appreciate that concern...".into(),
                });
            }
        }
        found.truncate(self.max_missed_opportunities);
        found
    }
}

fn timestamped_feedback(turns: &[ScoredTurn]) -> Vec<TimestampedFeedback> {
    let mut feedback = Vec::new();
    for (index, scored) in turns.iter().enumerate() {
        let timestamp = scored.turn.agent_start;
        let turn_number = index + 1;
        let score = &scored.score;

        for breaker in score.rapport_breakers() {
            feedback.push(TimestampedFeedback {
                timestamp,
                turn_number,
                kind: FeedbackKind::Critical,
                message: format!("Rapport breaker: {breaker}"),
                suggested_technique: Some(
                    "Use 'I can appreciate that' instead of 'I understand'".into(),
                ),
            });
        }

        if score.isolate() < 2 {
            feedback.push(TimestampedFeedback {
                timestamp,
                turn_number,
                kind: FeedbackKind::Improvement,
                message: "Client raised objection but you didn't isolate".into(),
                suggested_technique: Some(
                    "Ask: 'Besides that, is there any other reason you wouldn't...?'".into(),
                ),
            });
        }

        if score.total() >= EXCELLENT_TURN_TOTAL {
            feedback.push(TimestampedFeedback {
                timestamp,
                turn_number,
                kind: FeedbackKind::Strength,
                message: format!(
                    "Excellent CFR technique usage! Score: {}/{}",
                    score.total(),
                    score.max_score()
                ),
                suggested_technique: None,
            });
        }
    }
    feedback
}

fn key_wins(scores: &[TurnScore], averages: &DimensionAverages) -> Vec<String> {
    let mut wins = Vec::new();

    let strong_turns = scores
        .iter()
        .filter(|score| score.total() >= STRONG_TURN_TOTAL)
        .count();
    if strong_turns * 2 > scores.len() {
        wins.push("Consistent use of CFR framework throughout call".to_string());
    }

    if averages.acknowledge_affirm >= Dimension::AcknowledgeAffirm.strength_threshold() {
        wins.push("Excellent acknowledgement and affirmation skills".to_string());
    }
    if averages.isolate >= Dimension::Isolate.strength_threshold() {
        wins.push("Strong objection isolation".to_string());
    }

    let used = |technique: Technique| scores.iter().any(|score| score.uses_technique(technique));
    if used(Technique::FeelFeltFound) {
        wins.push("Used Feel-Felt-Found empathy technique".to_string());
    }
    if used(Technique::HasThereEverBeen) {
        wins.push("Used 'Has There Ever Been' to leverage past experience".to_string());
    }
    if used(Technique::LevelShift) {
        wins.push("Used Level Shift to reframe the concern".to_string());
    }
    if used(Technique::EmbeddedCommand) {
        wins.push("Used embedded commands to guide the client".to_string());
    }

    let instances: Vec<Technique> = scores
        .iter()
        .flat_map(|score| score.techniques_detected().iter().copied())
        .collect();
    if instances.len() >= 3 {
        let distinct: HashSet<Technique> = instances.iter().copied().collect();
        wins.push(format!(
            "Demonstrated variety of techniques ({} different)",
            distinct.len()
        ));
    }

    wins
}

fn improvement_areas(scores: &[TurnScore], averages: &DimensionAverages) -> Vec<String> {
    let mut areas: Vec<String> = Dimension::ALL
        .into_iter()
        .filter(|dimension| averages.get(*dimension) < dimension.improvement_threshold())
        .map(|dimension| improvement_line(dimension).to_string())
        .collect();

    let breakers = rapport_breaker_count(scores);
    if breakers > 0 {
        areas.push(format!(
            "Avoid rapport breakers ({breakers} instances detected)"
        ));
    }
    areas
}

fn improvement_line(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::AcknowledgeAffirm => {
            "Start responses with acknowledgement ('Perfect', 'I can appreciate that')"
        }
        Dimension::Isolate => "Practice isolation questions ('Besides that, any other concerns?')",
        Dimension::Handle => "Use more advanced techniques (Feel-Felt-Found, Level Shift)",
        Dimension::Close => {
            "Add closing questions ('Does that make sense?', 'Which works better?')"
        }
    }
}

fn technique_recommendations(scores: &[TurnScore]) -> Vec<String> {
    let mut recommendations = Vec::new();
    let never_used = |technique: Technique| !scores.iter().any(|score| score.uses_technique(technique));

    if never_used(Technique::FeelFeltFound) {
        recommendations.push(
            "Try Feel-Felt-Found: 'I know how you FEEL... clients have FELT the same... but what they FOUND was...'"
                .to_string(),
        );
    }
    if never_used(Technique::HasThereEverBeen) {
        recommendations
            .push("Use 'Has There Ever Been': Leverage past mistakes to prevent new ones".to_string());
    }
    if never_used(Technique::LevelShift) {
        recommendations.push(
            "Try a Level Shift: 'What I hear you saying is...' to reframe the concern".to_string(),
        );
    }

    let low_isolation = scores.iter().filter(|score| score.isolate() < 2).count();
    if low_isolation * 2 > scores.len() {
        recommendations.push(
            "Practice isolation: 'Besides X, is there any other reason you wouldn't Y?'".to_string(),
        );
    }

    recommendations
}
