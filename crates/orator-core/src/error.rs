use http::StatusCode;
use serde::Serialize;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by the endpoint error type. The server layer converts these
/// into actual HTTP responses, keeping provider crates decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error kind used in logs
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

/// JSON body returned by every failing endpoint: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    /// Build the body for an error, using its client-safe message
    pub fn from_error<E: HttpError + ?Sized>(error: &E) -> Self {
        Self {
            error: error.client_message(),
        }
    }
}
