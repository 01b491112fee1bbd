use super::generator::{ReplyGenerator, ReplyRequest};
use crate::coaching::{Directive, SessionSummary};
use crate::persona::{Difficulty, PersonaDefinition, SessionState};
use crate::prompt::{TeraEngine, build_persona_prompt};
use crate::rubric::{RubricScorer, TurnScore, practice_suggestions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{Display, EnumString};
use tracing::info;
use uuid::Uuid;

/// Line a trainee session opens with. Unscored.
pub const OPENING_LINE: &str = "Hi, I'm a real estate agent. How can I help you today?";

/// How much coaching the trainee sees while the session runs.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TrainingMode {
    /// Score, feedback and drills after every turn.
    Practice,
    /// Score and feedback after every turn.
    #[default]
    Scoring,
    /// Nothing until the session ends.
    Challenge,
}

/// What the trainee gets back for one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnOutcome {
    pub reply: String,
    pub cooperation: u8,
    pub directive: Directive,
    /// Objection the counterpart raised with this reply.
    pub objection: Option<String>,
    pub score: Option<TurnScore>,
    pub feedback: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleplaySummary {
    #[serde(flatten)]
    pub session: SessionSummary,
    pub final_cooperation: u8,
    pub objections_raised: Vec<String>,
}

/// One live practice conversation against a persona.
pub struct RoleplaySession {
    id: Uuid,
    persona: PersonaDefinition,
    difficulty: Difficulty,
    mode: TrainingMode,
    scorer: Arc<RubricScorer>,
    generator: Box<dyn ReplyGenerator>,
    engine: TeraEngine,
    state: SessionState,
    last_reply: Option<String>,
    exchanges: Vec<(String, String)>,
}

impl RoleplaySession {
    pub fn new(
        persona: PersonaDefinition,
        difficulty: Difficulty,
        mode: TrainingMode,
        scorer: Arc<RubricScorer>,
        generator: Box<dyn ReplyGenerator>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            persona,
            difficulty,
            mode,
            scorer,
            generator,
            engine: TeraEngine::new(),
            state: SessionState::new(),
            last_reply: None,
            exchanges: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn persona(&self) -> &PersonaDefinition {
        &self.persona
    }

    pub fn mode(&self) -> TrainingMode {
        self.mode
    }

    pub fn cooperation(&self) -> u8 {
        self.state.cooperation()
    }

    /// `(trainee, counterpart)` pairs so far.
    pub fn exchanges(&self) -> &[(String, String)] {
        &self.exchanges
    }

    /// The counterpart's system prompt at the current cooperation level.
    pub fn system_prompt(&mut self) -> Result<String> {
        let prompt = build_persona_prompt(
            &mut self.engine,
            &self.persona,
            self.difficulty,
            self.state.cooperation(),
        )?;
        Ok(prompt)
    }

    /// Handle one trainee message. The first message has no counterpart
    /// context and is not scored.
    pub async fn respond(&mut self, utterance: &str) -> Result<TurnOutcome> {
        let score = self.last_reply.as_deref().map(|context| {
            let score = self.scorer.score(utterance, Some(context));
            self.state.record_turn(score.clone());
            score
        });

        let cooperation = self.state.cooperation();
        let directive = self.state.directive();
        let objection = if directive == Directive::Cooperative {
            None
        } else {
            self.state.next_objection(&self.persona, self.difficulty)
        };

        let system_prompt =
            build_persona_prompt(&mut self.engine, &self.persona, self.difficulty, cooperation)?;
        let reply = self
            .generator
            .reply(ReplyRequest {
                system_prompt: &system_prompt,
                utterance,
                directive,
                objection,
            })
            .await
            .with_context(|| format!("{} reply generator failed", self.generator.name()))?;
        let objection = objection.map(|raised| raised.name.clone());

        info!(
            session = %self.id,
            cooperation,
            directive = %directive,
            scored = score.is_some(),
            "roleplay.turn"
        );

        self.exchanges.push((utterance.to_string(), reply.clone()));
        self.last_reply = Some(reply.clone());

        Ok(self.shape(reply, cooperation, directive, objection, score))
    }

    fn shape(
        &self,
        reply: String,
        cooperation: u8,
        directive: Directive,
        objection: Option<String>,
        score: Option<TurnScore>,
    ) -> TurnOutcome {
        let mut outcome = TurnOutcome {
            reply,
            cooperation,
            directive,
            objection,
            score: None,
            feedback: Vec::new(),
            suggestions: Vec::new(),
        };
        let Some(score) = score else {
            return outcome;
        };
        match self.mode {
            TrainingMode::Practice => {
                outcome.feedback = score.feedback().to_vec();
                outcome.suggestions = practice_suggestions(&score);
                outcome.score = Some(score);
            }
            TrainingMode::Scoring => {
                outcome.feedback = score.feedback().to_vec();
                outcome.score = Some(score);
            }
            TrainingMode::Challenge => {}
        }
        outcome
    }

    /// `None` until at least one message has been scored.
    pub fn summary(&self) -> Option<RoleplaySummary> {
        Some(RoleplaySummary {
            session: self.state.summary()?,
            final_cooperation: self.state.cooperation(),
            objections_raised: self.state.objections_raised().to_vec(),
        })
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.last_reply = None;
        self.exchanges.clear();
        info!(session = %self.id, "roleplay.reset");
    }
}
