//! CFR rubric: vocabulary, the deterministic scorer and grading helpers.

pub mod conversation;
pub mod grading;
pub mod scorer;
pub mod suggestions;
pub mod types;
pub mod vocabulary;

pub use conversation::ConversationScore;
pub use grading::{Dimension, DimensionAverages, Grade, ScoreTotals, rapport_breaker_count};
pub use scorer::RubricScorer;
pub use suggestions::practice_suggestions;
pub use types::{MAX_TURN_SCORE, SubScores, Technique, TurnScore};
pub use vocabulary::{HandlingVocabulary, MagicPhraseTemplate, RapportBreakerRule, RubricVocabulary};
