//! Request extractors for the coaching endpoints

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::StatusCode,
};
use orator_core::AudioPayload;
use serde::Deserialize;
use strum::VariantNames;
use tts::Voice;

use crate::error::{CoachError, Result};
use crate::rubric::Rubric;
use crate::task::{AnalysisKind, TaskContext};

/// Form field carrying the recording
const AUDIO_FIELD: &str = "audio";

/// A multipart submission: the recording plus the task's text fields
///
/// The body is read in full, bounded by the router's body limit.
#[derive(Debug, Default)]
pub struct Submission {
    audio: Option<AudioPayload>,
    fields: HashMap<String, String>,
    limit: Option<usize>,
}

impl<S> FromRequest<S> for Submission
where
    S: Send + Sync,
{
    type Rejection = CoachError;

    async fn from_request(request: Request, state: &S) -> Result<Self> {
        let limit = request.extensions().get::<UploadLimit>().map(|limit| limit.0);

        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|rejection| CoachError::Validation(rejection.body_text()))?;

        let mut submission = Self {
            limit,
            ..Self::default()
        };

        while let Some(field) = multipart.next_field().await.map_err(|e| submission.read_error(&e))? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == AUDIO_FIELD {
                let content_type = field.content_type().map(str::to_owned);
                let filename = field.file_name().map(str::to_owned);
                let data = field.bytes().await.map_err(|e| submission.read_error(&e))?;

                submission.audio = Some(AudioPayload::new(data, content_type.as_deref(), filename.as_deref()));
            } else {
                let value = field.text().await.map_err(|e| submission.read_error(&e))?;
                submission.fields.insert(name, value);
            }
        }

        Ok(submission)
    }
}

impl Submission {
    fn read_error(&self, err: &MultipartError) -> CoachError {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            CoachError::PayloadTooLarge {
                limit: self.limit.unwrap_or_default(),
            }
        } else {
            CoachError::Validation(format!("Malformed multipart body: {}", err.body_text()))
        }
    }

    /// Take the recording; absent or zero-length uploads are rejected
    pub fn require_audio(&mut self) -> Result<AudioPayload> {
        self.audio
            .take()
            .filter(|audio| !audio.is_empty())
            .ok_or_else(|| CoachError::Validation("An audio file is required".to_owned()))
    }

    /// A required text field, trimmed
    pub fn require_text(&self, name: &str) -> Result<String> {
        self.text(name)
            .ok_or_else(|| CoachError::Validation(format!("`{name}` is required")))
    }

    /// An optional text field, trimmed; blank counts as absent
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(String::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    }

    /// An optional field holding a JSON array of strings
    pub fn string_list(&self, name: &str) -> Result<Vec<String>> {
        let Some(raw) = self.text(name) else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw)
            .map_err(|_| CoachError::Validation(format!("`{name}` must be a JSON array of strings")))
    }

    pub fn into_feedback(mut self) -> Result<(AudioPayload, TaskContext)> {
        let audio = self.require_audio()?;
        let task = TaskContext::Feedback {
            topic: self.require_text("topic")?,
            context: self.text("context"),
            previous_exchanges: self.string_list("previousExchanges")?,
        };
        Ok((audio, task))
    }

    pub fn into_story(mut self) -> Result<(AudioPayload, TaskContext)> {
        let audio = self.require_audio()?;
        let story_prompt = self.require_text("storyPrompt")?;
        let rubric = Rubric::from_labels(self.string_list("criteria")?).unwrap_or_else(Rubric::default_story);
        Ok((audio, TaskContext::Story { story_prompt, rubric }))
    }

    pub fn into_conversation(mut self) -> Result<(AudioPayload, TaskContext)> {
        let audio = self.require_audio()?;
        let task = TaskContext::Conversation {
            scenario: self.require_text("scenario")?,
            role: self.require_text("role")?,
            previous_exchanges: self.string_list("previousExchanges")?,
        };
        Ok((audio, task))
    }

    pub fn into_analysis(mut self) -> Result<(AudioPayload, TaskContext)> {
        let audio = self.require_audio()?;
        let task = TaskContext::Analysis {
            expected_text: self.require_text("expectedText")?,
            kind: AnalysisKind::from_field(self.fields.get("type").map(String::as_str)),
        };
        Ok((audio, task))
    }
}

/// Upload limit made visible to extractors so 413 bodies can name it
#[derive(Debug, Clone, Copy)]
pub(crate) struct UploadLimit(pub usize);

/// JSON body of a text-to-speech request
#[derive(Debug)]
pub struct SpeechInput {
    pub text: String,
    pub voice: Voice,
}

#[derive(Deserialize)]
struct SpeechBody {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    voice: Option<String>,
}

impl<S> FromRequest<S> for SpeechInput
where
    S: Send + Sync,
{
    type Rejection = CoachError;

    async fn from_request(request: Request, state: &S) -> Result<Self> {
        let limit = request.extensions().get::<UploadLimit>().map(|limit| limit.0);

        let bytes = Bytes::from_request(request, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                CoachError::PayloadTooLarge {
                    limit: limit.unwrap_or_default(),
                }
            } else {
                CoachError::Validation(rejection.body_text())
            }
        })?;

        Self::parse(&bytes)
    }
}

impl SpeechInput {
    /// Parse `{"text": ..., "voice": ...}`; voice defaults to alloy
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let body: SpeechBody = serde_json::from_slice(bytes)
            .map_err(|e| CoachError::Validation(format!("Invalid JSON body: {e}")))?;

        let text = body
            .text
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| CoachError::Validation("Text is required".to_owned()))?;

        let voice = match body.voice.as_deref().map(str::trim) {
            None | Some("") => Voice::default(),
            Some(name) => name.parse().map_err(|_| {
                CoachError::Validation(format!(
                    "Unsupported voice `{name}`, expected one of: {}",
                    Voice::VARIANTS.join(", ")
                ))
            })?,
        };

        Ok(Self { text, voice })
    }
}
