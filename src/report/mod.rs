//! Offline call review reports.

pub mod builder;
pub mod render;
pub mod types;

pub use builder::CallReportBuilder;
pub use types::{CallReport, FeedbackKind, MissedOpportunity, ScoredTurn, TimestampedFeedback};
