//! Offline review of a recorded call: label speakers, pair turns, score
//! them and build the coaching report.

use crate::config::Config;
use crate::error::RubricError;
use crate::report::{CallReport, CallReportBuilder, ScoredTurn};
use crate::rubric::RubricScorer;
use crate::transcript::{
    KeywordAlternationLabeler, NearestPrecedingExtractor, SpeakerLabeler, Transcript,
    TurnExtractor,
};
use std::sync::Arc;
use tracing::{info, warn};

pub struct CallAnalyzer {
    scorer: Arc<RubricScorer>,
    labeler: Box<dyn SpeakerLabeler>,
    extractor: Box<dyn TurnExtractor>,
    builder: CallReportBuilder,
}

impl CallAnalyzer {
    pub fn new(
        scorer: Arc<RubricScorer>,
        labeler: Box<dyn SpeakerLabeler>,
        extractor: Box<dyn TurnExtractor>,
        builder: CallReportBuilder,
    ) -> Self {
        Self {
            scorer,
            labeler,
            extractor,
            builder,
        }
    }

    /// Keyword labeller and nearest-preceding pairing, tuned by `[analysis]`.
    pub fn from_config(config: &Config, scorer: Arc<RubricScorer>) -> Self {
        Self::new(
            scorer,
            Box::new(KeywordAlternationLabeler::new(&config.analysis.agent_keywords)),
            Box::new(NearestPrecedingExtractor),
            CallReportBuilder::from_config(&config.analysis),
        )
    }

    /// Built-in rubric with default analysis settings.
    pub fn with_defaults() -> Result<Self, RubricError> {
        Ok(Self::from_config(
            &Config::default(),
            Arc::new(RubricScorer::builtin()?),
        ))
    }

    pub fn identify_speakers(&self, transcript: &mut Transcript) {
        self.labeler.label(transcript);
    }

    /// Score every agent turn of an already-labelled transcript. `None` when
    /// the transcript has no agent speech.
    pub fn analyze(&self, transcript: Transcript) -> Option<CallReport> {
        let turns: Vec<ScoredTurn> = self
            .extractor
            .extract(&transcript)
            .into_iter()
            .map(|turn| {
                let score = self
                    .scorer
                    .score(&turn.agent_text, Some(&turn.counterpart_text));
                ScoredTurn { turn, score }
            })
            .collect();

        let segments = transcript.segments.len();
        let Some(report) = self.builder.build(transcript, turns) else {
            warn!(segments, "call.no_agent_turns");
            return None;
        };

        info!(
            turns = report.turns.len(),
            total = report.totals.total,
            max = report.totals.max,
            grade = %report.totals.grade,
            "call.analyzed"
        );
        Some(report)
    }
}
