#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Chat completions constrained to a single JSON object

mod error;
mod protocol;
mod provider;
mod types;

pub use error::LlmError;
pub use provider::{CompletionProvider, openai::OpenAiProvider};
pub use types::{CompletionRequest, CompletionResponse};
