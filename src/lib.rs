#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

//! Coaching for real estate sales calls built around the CFR method
//! (Acknowledge/Affirm, Isolate, Handle, Close).

pub mod analysis;
pub mod coaching;
pub mod config;
pub mod error;
pub mod persona;
pub mod prompt;
pub mod report;
pub mod roleplay;
pub mod rubric;
pub mod transcript;
pub mod utils;

pub use analysis::CallAnalyzer;
pub use config::Config;
pub use error::{CoachError, Result};
pub use rubric::{RubricScorer, TurnScore};
