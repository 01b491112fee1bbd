//! Live-session state: counterpart cooperation and the running turn history.

pub mod aggregator;
pub mod cooperation;

pub use aggregator::{SessionAggregator, SessionSummary};
pub use cooperation::{CooperationModel, Directive, INITIAL_COOPERATION, MAX_COOPERATION};
