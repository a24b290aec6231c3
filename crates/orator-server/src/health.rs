use axum::response::IntoResponse;
use http::StatusCode;

/// Liveness probe; answers even when the provider credential is missing
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
