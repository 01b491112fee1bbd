use super::types::Transcript;
use anyhow::{Context, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

/// Source of transcripts. Audio transcription services plug in here; the
/// crate itself only ships a reader for already-transcribed JSON.
pub trait Transcriber: Send + Sync {
    /// Human-readable source name (e.g. "json-file")
    fn name(&self) -> &str;

    fn transcribe<'a>(
        &'a self,
        input: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<Transcript>> + Send + 'a>>;
}

/// Reads transcripts a transcription service has already written to disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTranscriptFile;

impl Transcriber for JsonTranscriptFile {
    fn name(&self) -> &str {
        "json-file"
    }

    fn transcribe<'a>(
        &'a self,
        input: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<Transcript>> + Send + 'a>> {
        let path: PathBuf = input.to_path_buf();
        Box::pin(async move {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read transcript {}", path.display()))?;
            let transcript = Transcript::from_json_str(&raw)
                .with_context(|| format!("failed to parse transcript {}", path.display()))?;
            Ok(transcript)
        })
    }
}
