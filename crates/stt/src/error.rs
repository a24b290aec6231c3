use thiserror::Error;

pub type Result<T> = std::result::Result<T, SttError>;

/// Transcription failures
///
/// Every variant is an upstream failure from the caller's point of view;
/// the distinction only matters for logs.
#[derive(Debug, Error)]
pub enum SttError {
    /// Provider rejected the audio (unsupported codec, corrupt upload)
    #[error("provider rejected the audio: {0}")]
    InvalidRequest(String),

    /// Provider rejected the API key
    #[error("authentication with the transcription provider failed: {0}")]
    AuthenticationFailed(String),

    /// Provider API returned an error
    #[error("transcription provider error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("could not reach the transcription provider: {0}")]
    ConnectionError(String),

    /// Provider answered with something other than a transcription
    #[error("unreadable transcription response: {0}")]
    InvalidResponse(String),

    /// Provider recognized no speech
    #[error("no speech was recognized in the recording")]
    EmptyTranscript,
}
