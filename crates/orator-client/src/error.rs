/// Client-specific result type
pub type Result<T> = std::result::Result<T, OratorClientError>;

/// Errors from the Orator client
#[derive(Debug, thiserror::Error)]
pub enum OratorClientError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with an `{error}` body
    #[error("{status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the `error` field, or the raw body
        message: String,
    },

    /// Failed to parse response
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl OratorClientError {
    /// HTTP status of an API error
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
