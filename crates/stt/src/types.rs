use std::fmt;

use orator_core::AudioPayload;

/// Transcription request following the `OpenAI` Whisper API format
#[derive(Debug)]
pub struct TranscriptionRequest {
    /// Recorded audio and its declared format
    pub audio: AudioPayload,
    /// Model identifier (e.g. "whisper-1")
    pub model: String,
}

/// Text recognized from a learner's recording
///
/// This is the authoritative record of what was said: evaluation results
/// always carry this value rather than anything the completion model echoes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
