//! Live roleplay practice against a simulated counterpart.

pub mod generator;
pub mod session;

pub use generator::{ReplyGenerator, ReplyRequest, ScriptedReplyGenerator};
pub use session::{OPENING_LINE, RoleplaySession, RoleplaySummary, TrainingMode, TurnOutcome};
