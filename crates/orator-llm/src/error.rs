use thiserror::Error;

/// Errors that can occur while requesting a completion
#[derive(Debug, Error)]
pub enum LlmError {
    /// Upstream provider could not be reached or returned an error
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Provider answered 2xx but without any completion text
    #[error("completion contained no content")]
    EmptyCompletion,
}
