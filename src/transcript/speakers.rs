use super::types::{Speaker, Transcript};
use tracing::info;

pub const DEFAULT_AGENT_KEYWORDS: &[&str] = &[
    "let me show you",
    "i can help",
    "our team",
    "i would recommend",
    "i'll send you",
    "my clients",
    "i appreciate that",
    "perfect",
    "does that make sense",
];

/// Attaches a speaker label to every segment of a transcript, in place.
pub trait SpeakerLabeler: Send + Sync {
    fn label(&self, transcript: &mut Transcript);
}

/// Best-effort heuristic: a segment containing an agent keyword is the agent;
/// otherwise speakers are assumed to alternate. The first segment defaults to
/// the client. Overlapping or consecutive speech from one party is mislabelled.
#[derive(Debug, Clone)]
pub struct KeywordAlternationLabeler {
    keywords: Vec<String>,
}

impl Default for KeywordAlternationLabeler {
    fn default() -> Self {
        Self::new(DEFAULT_AGENT_KEYWORDS.iter().copied())
    }
}

impl KeywordAlternationLabeler {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|keyword| keyword.as_ref().to_lowercase())
                .filter(|keyword| !keyword.trim().is_empty())
                .collect(),
        }
    }

    fn is_agent(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| lower.contains(keyword.as_str()))
    }
}

impl SpeakerLabeler for KeywordAlternationLabeler {
    fn label(&self, transcript: &mut Transcript) {
        let mut previous: Option<Speaker> = None;
        for segment in &mut transcript.segments {
            let speaker = if self.is_agent(&segment.text) {
                Speaker::Agent
            } else {
                previous.map_or(Speaker::Client, Speaker::opposite)
            };
            segment.speaker = Some(speaker);
            previous = Some(speaker);
        }

        let agent_turns = transcript.agent_turns().count();
        let client_turns = transcript.client_turns().count();
        info!(
            segments = transcript.segments.len(),
            agent_turns, client_turns, "speakers.identified"
        );
    }
}
