pub(crate) mod whisper;

use async_trait::async_trait;

use crate::types::{Transcript, TranscriptionRequest};

/// Trait for STT provider implementations
#[async_trait]
pub trait SttProvider: Send + Sync {
    /// Transcribe audio to text
    ///
    /// Attempted exactly once; callers surface failures rather than retry.
    async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<Transcript>;

    /// Get the provider name
    fn name(&self) -> &str;
}
