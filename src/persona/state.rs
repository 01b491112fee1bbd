use super::definition::{Difficulty, ObjectionPattern, PersonaDefinition};
use crate::coaching::{CooperationModel, Directive, SessionAggregator, SessionSummary};
use crate::rubric::TurnScore;

/// Mutable per-session state, kept apart from the persona it simulates.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    cooperation: CooperationModel,
    objection_cursor: usize,
    objections_raised: Vec<String>,
    history: SessionAggregator,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cooperation(&self) -> u8 {
        self.cooperation.level()
    }

    pub fn directive(&self) -> Directive {
        self.cooperation.directive()
    }

    /// Record a scored turn and move cooperation. Returns the new level.
    pub fn record_turn(&mut self, score: TurnScore) -> u8 {
        let level = self.cooperation.adjust(i64::from(score.total()));
        self.history.record(score);
        level
    }

    /// Advance the objection cursor over the objections `difficulty` allows.
    /// `None` once they are exhausted.
    pub fn next_objection<'p>(
        &mut self,
        persona: &'p PersonaDefinition,
        difficulty: Difficulty,
    ) -> Option<&'p ObjectionPattern> {
        let objection = persona
            .objections_for(difficulty)
            .get(self.objection_cursor)?;
        self.objection_cursor += 1;
        self.objections_raised.push(objection.name.clone());
        Some(objection)
    }

    pub fn objections_raised(&self) -> &[String] {
        &self.objections_raised
    }

    pub fn history(&self) -> &SessionAggregator {
        &self.history
    }

    pub fn summary(&self) -> Option<SessionSummary> {
        self.history.summary()
    }

    pub fn reset(&mut self) {
        self.cooperation.reset();
        self.objection_cursor = 0;
        self.objections_raised.clear();
        self.history.reset();
    }
}
