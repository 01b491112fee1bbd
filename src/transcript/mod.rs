//! Call transcripts: loading, speaker labelling and turn pairing.

pub mod source;
pub mod speakers;
pub mod turns;
pub mod types;

pub use source::{JsonTranscriptFile, Transcriber};
pub use speakers::{DEFAULT_AGENT_KEYWORDS, KeywordAlternationLabeler, SpeakerLabeler};
pub use turns::{ExtractedTurn, NearestPrecedingExtractor, TurnExtractor};
pub use types::{Speaker, SpeechSegment, Transcript};
