use thiserror::Error;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Speech synthesis failures
#[derive(Debug, Error)]
pub enum TtsError {
    /// Provider rejected the input text or voice
    #[error("provider rejected the speech request: {0}")]
    InvalidRequest(String),

    /// Provider rejected the API key
    #[error("authentication with the speech provider failed: {0}")]
    AuthenticationFailed(String),

    /// Provider API returned an error
    #[error("speech provider error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("could not reach the speech provider: {0}")]
    ConnectionError(String),

    /// Response body could not be read or was empty
    #[error("unreadable speech response: {0}")]
    InvalidResponse(String),
}
