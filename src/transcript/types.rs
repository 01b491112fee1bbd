use crate::error::TranscriptError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Write as _;
use strum::Display;

/// Which party spoke a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Speaker {
    Agent,
    Client,
}

impl Speaker {
    pub fn opposite(self) -> Self {
        match self {
            Self::Agent => Self::Client,
            Self::Client => Self::Agent,
        }
    }
}

/// One timed piece of speech. `speaker` is `None` until labelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(
        default,
        deserialize_with = "lenient_speaker",
        skip_serializing_if = "Option::is_none"
    )]
    pub speaker: Option<Speaker>,
}

impl SpeechSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            speaker: None,
        }
    }

    pub fn with_speaker(mut self, speaker: Speaker) -> Self {
        self.speaker = Some(speaker);
        self
    }
}

/// Labels other than agent/client ("unknown", "spk_2", ...) load as unlabelled.
fn lenient_speaker<'de, D>(deserializer: D) -> Result<Option<Speaker>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|label| match label.trim().to_lowercase().as_str() {
        "agent" => Some(Speaker::Agent),
        "client" => Some(Speaker::Client),
        _ => None,
    }))
}

#[derive(Deserialize)]
struct RawTranscript {
    segments: Vec<SpeechSegment>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    language: Option<String>,
}

/// Ordered speech segments of one call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    pub segments: Vec<SpeechSegment>,
    pub duration: f64,
    pub language: String,
}

impl Transcript {
    /// Duration falls back to the last segment's end.
    pub fn new(segments: Vec<SpeechSegment>) -> Self {
        let duration = segments.last().map_or(0.0, |segment| segment.end);
        Self {
            segments,
            duration,
            language: "en".to_string(),
        }
    }

    /// Parse the transcription collaborator's JSON shape:
    /// `{"segments": [{"start", "end", "text", "speaker"?}], "duration"?, "language"?}`.
    pub fn from_json_str(raw: &str) -> Result<Self, TranscriptError> {
        let parsed: RawTranscript =
            serde_json::from_str(raw).map_err(|e| TranscriptError::Parse(e.to_string()))?;

        let segments: Vec<SpeechSegment> = parsed
            .segments
            .into_iter()
            .map(|mut segment| {
                segment.text = segment.text.trim().to_string();
                segment
            })
            .collect();

        let mut transcript = Self::new(segments);
        if let Some(duration) = parsed.duration {
            transcript.duration = duration;
        }
        if let Some(language) = parsed.language.filter(|lang| !lang.trim().is_empty()) {
            transcript.language = language;
        }
        transcript.validate()?;
        Ok(transcript)
    }

    /// Times must be finite and non-negative with `end >= start`.
    pub fn validate(&self) -> Result<(), TranscriptError> {
        for (index, segment) in self.segments.iter().enumerate() {
            let valid = segment.start.is_finite()
                && segment.end.is_finite()
                && segment.start >= 0.0
                && segment.end >= segment.start;
            if !valid {
                return Err(TranscriptError::InvalidTiming {
                    index,
                    start: segment.start,
                    end: segment.end,
                });
            }
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(TranscriptError::Parse(format!(
                "duration must be non-negative, got {}",
                self.duration
            )));
        }
        Ok(())
    }

    pub fn segments_by(&self, speaker: Speaker) -> impl Iterator<Item = &SpeechSegment> {
        self.segments
            .iter()
            .filter(move |segment| segment.speaker == Some(speaker))
    }

    pub fn agent_turns(&self) -> impl Iterator<Item = &SpeechSegment> {
        self.segments_by(Speaker::Agent)
    }

    pub fn client_turns(&self) -> impl Iterator<Item = &SpeechSegment> {
        self.segments_by(Speaker::Client)
    }

    /// Plain-text listing, one `[12.5s] AGENT: text` line per segment.
    pub fn render_text(&self) -> String {
        let mut out = format!("Call Transcript ({:.1}s)\n", self.duration);
        out.push_str(&"=".repeat(60));
        out.push_str("\n\n");
        for segment in &self.segments {
            let speaker = segment
                .speaker
                .map_or_else(|| "UNKNOWN".to_string(), |s| s.to_string().to_uppercase());
            let _ = writeln!(out, "[{:.1}s] {speaker}: {}", segment.start, segment.text);
        }
        out
    }
}
