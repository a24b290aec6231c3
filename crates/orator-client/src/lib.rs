#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Typed Rust HTTP client for the Orator coaching API
//!
//! Wraps the five practice endpoints: debate feedback, story evaluation,
//! conversation simulation, speech analysis and text-to-speech.

mod client;
pub mod error;
pub mod types;

pub use client::OratorClient;
pub use error::{OratorClientError, Result};
pub use types::*;
