use super::types::Transcript;
use serde::Serialize;

/// An agent utterance paired with the counterpart speech it answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedTurn {
    pub agent_text: String,
    /// Empty when the counterpart had not spoken yet.
    pub counterpart_text: String,
    pub agent_start: f64,
}

/// Rebuilds scoreable turns from a labelled transcript.
pub trait TurnExtractor: Send + Sync {
    fn extract(&self, transcript: &Transcript) -> Vec<ExtractedTurn>;
}

/// Pairs each agent segment with the latest client segment that started
/// strictly before it. One forward pass over both speakers.
///
/// Segments are assumed chronological. Speech does not have to alternate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestPrecedingExtractor;

impl TurnExtractor for NearestPrecedingExtractor {
    fn extract(&self, transcript: &Transcript) -> Vec<ExtractedTurn> {
        let mut clients = transcript.client_turns().peekable();
        let mut candidate = "";
        let mut turns = Vec::new();

        for agent in transcript.agent_turns() {
            while let Some(client) = clients.next_if(|client| client.start < agent.start) {
                candidate = &client.text;
            }
            turns.push(ExtractedTurn {
                agent_text: agent.text.clone(),
                counterpart_text: candidate.to_string(),
                agent_start: agent.start,
            });
        }

        turns
    }
}
