use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use orator_core::{ErrorBody, HttpError};
use orator_llm::LlmError;
use stt::SttError;
use thiserror::Error;
use tts::TtsError;

pub type Result<T> = std::result::Result<T, CoachError>;

/// Shown whenever an endpoint is hit without a provider credential
pub const MISSING_CREDENTIAL: &str = "AI provider API key is not configured. \
     Set provider.api_key (for example from the OPENAI_API_KEY environment variable) and restart.";

/// Failures of the coaching endpoints
#[derive(Debug, Error)]
pub enum CoachError {
    /// Server is missing something it needs before any work can start
    #[error("{0}")]
    Configuration(String),

    /// Required input missing or malformed
    #[error("{0}")]
    Validation(String),

    /// Upload above the configured size limit
    #[error("Request body is too large, limit is {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// Transcription, completion or synthesis failed or timed out
    #[error("{0}")]
    Upstream(String),

    /// Completion text was not a usable evaluation
    #[error("Failed to parse AI response: {0}")]
    MalformedResponse(String),
}

impl CoachError {
    pub(crate) fn missing_credential() -> Self {
        Self::Configuration(MISSING_CREDENTIAL.to_owned())
    }
}

impl HttpError for CoachError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Configuration(_) | Self::Upstream(_) | Self::MalformedResponse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Configuration(_) => "configuration_error",
            Self::Validation(_) => "invalid_request_error",
            Self::PayloadTooLarge { .. } => "payload_too_large",
            Self::Upstream(_) => "upstream_error",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl From<SttError> for CoachError {
    fn from(err: SttError) -> Self {
        Self::Upstream(format!("Transcription failed: {err}"))
    }
}

impl From<LlmError> for CoachError {
    fn from(err: LlmError) -> Self {
        Self::Upstream(format!("Completion failed: {err}"))
    }
}

impl From<TtsError> for CoachError {
    fn from(err: TtsError) -> Self {
        Self::Upstream(format!("Speech synthesis failed: {err}"))
    }
}

impl IntoResponse for CoachError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error_type = self.error_type(), error = %self, "request failed");
        } else {
            tracing::debug!(error_type = self.error_type(), error = %self, "request rejected");
        }

        (status, Json(ErrorBody::from_error(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn body_of(err: CoachError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_is_bad_request() {
        let (status, body) = body_of(CoachError::Validation("topic is required".to_owned())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "topic is required"}));
    }

    #[tokio::test]
    async fn missing_credential_is_server_error() {
        let (status, body) = body_of(CoachError::missing_credential()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().starts_with("AI provider API key is not configured"));
    }

    #[tokio::test]
    async fn oversized_upload_names_the_limit() {
        let (status, body) = body_of(CoachError::PayloadTooLarge { limit: 1024 }).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "Request body is too large, limit is 1024 bytes");
    }

    #[test]
    fn provider_errors_are_upstream() {
        let err = CoachError::from(SttError::EmptyTranscript);
        assert!(matches!(err, CoachError::Upstream(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = CoachError::from(LlmError::EmptyCompletion);
        assert_eq!(err.to_string(), "Completion failed: completion contained no content");
    }

    #[test]
    fn malformed_response_keeps_parse_detail() {
        let err = CoachError::MalformedResponse("missing field `feedback`".to_owned());
        assert_eq!(err.client_message(), "Failed to parse AI response: missing field `feedback`");
        assert_eq!(err.error_type(), "malformed_response");
    }
}
