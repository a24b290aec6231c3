#![allow(clippy::must_use_candidate)]

mod audio;
mod error;
mod http_client;

pub use audio::AudioPayload;
pub use error::{ErrorBody, HttpError};
pub use http_client::http_client;
