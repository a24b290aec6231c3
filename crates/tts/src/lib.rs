#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Text-to-speech for the coach's spoken prompts and simulated replies

mod error;
mod provider;
mod types;

pub use error::{Result, TtsError};
pub use provider::{TtsProvider, openai_tts::OpenAiTtsProvider};
pub use types::{SpeechRequest, SpeechResponse, Voice};
