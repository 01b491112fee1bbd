use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `callcoach`.
///
/// Scoring, cooperation tracking, aggregation and report building are total
/// functions and never produce these. Errors only come from loading things:
/// configuration, the rubric vocabulary, persona files, transcripts and
/// prompt templates. Orchestration code keeps using `anyhow::Result` for
/// context chains.
#[derive(Debug, Error)]
pub enum CoachError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Rubric vocabulary ───────────────────────────────────────────────
    #[error("rubric: {0}")]
    Rubric(#[from] RubricError),

    // ── Persona definitions ─────────────────────────────────────────────
    #[error("persona: {0}")]
    Persona(#[from] PersonaError),

    // ── Transcripts ─────────────────────────────────────────────────────
    #[error("transcript: {0}")]
    Transcript(#[from] TranscriptError),

    // ── Prompt / Template ───────────────────────────────────────────────
    #[error("prompt: {0}")]
    Prompt(#[from] PromptError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Rubric errors ───────────────────────────────────────────────────────────

/// Construction-time failures of the rubric. A scorer is never built from a
/// partial vocabulary.
#[derive(Debug, Error)]
pub enum RubricError {
    #[error("failed to read rubric vocabulary {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed rubric vocabulary: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("rubric vocabulary field `{field}` must not be empty")]
    Empty { field: String },

    #[error("invalid pattern in `{field}`: {pattern}: {source}")]
    InvalidPattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

// ─── Persona errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PersonaError {
    #[error("persona {0} not found")]
    NotFound(String),

    #[error("failed to read persona {path}: {message}")]
    Read { path: String, message: String },

    #[error("malformed persona {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid persona {id}: {message}")]
    Invalid { id: String, message: String },
}

// ─── Transcript errors ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to read transcript {path}: {message}")]
    Read { path: String, message: String },

    #[error("malformed transcript: {0}")]
    Parse(String),

    #[error("segment {index} has invalid timing: start={start} end={end}")]
    InvalidTiming { index: usize, start: f64, end: f64 },
}

// ─── Prompt / Template errors ───────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("template render failed: {0}")]
    Render(String),

    #[error("template not found: {0}")]
    NotFound(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, CoachError>;
