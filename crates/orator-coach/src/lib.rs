#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

//! Speaking-practice evaluation: from a learner's recording to scored feedback

mod error;
mod evaluation;
mod handlers;
mod ingest;
mod pipeline;
mod prompt;
mod rubric;
mod state;
mod task;

use axum::{Extension, Router, extract::DefaultBodyLimit, routing::post};

pub use error::{CoachError, MISSING_CREDENTIAL, Result};
pub use evaluation::{EvaluationResult, Extension as EvaluationExtension, Metric, parse_evaluation};
pub use ingest::{SpeechInput, Submission};
pub use pipeline::{Coach, Models};
pub use prompt::build_prompt;
pub use rubric::{Criterion, DEFAULT_STORY_CRITERIA, Rubric};
pub use state::{CoachState, require_credentials};
pub use task::{AnalysisKind, TaskContext};

use crate::ingest::UploadLimit;

/// Router with the five coaching endpoints
///
/// Request bodies are capped at `max_upload_bytes`. The credential check runs
/// before any extractor so a misconfigured server never reads an upload.
pub fn endpoint_router(state: CoachState, max_upload_bytes: usize) -> Router {
    let guard = state.clone();

    Router::new()
        .route("/api/ai-feedback", post(handlers::ai_feedback))
        .route("/api/evaluate-story", post(handlers::evaluate_story))
        .route("/api/simulate-conversation", post(handlers::simulate_conversation))
        .route("/api/speech-analysis-openai", post(handlers::speech_analysis))
        .route("/api/text-to-speech", post(handlers::text_to_speech))
        .route_layer(axum::middleware::from_fn(move |req, next| {
            let state = guard.clone();
            async move { require_credentials(state, req, next).await }
        }))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(Extension(UploadLimit(max_upload_bytes)))
        .with_state(state)
}
