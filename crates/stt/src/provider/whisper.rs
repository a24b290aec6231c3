use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{
    error::SttError,
    types::{Transcript, TranscriptionRequest},
};

use super::SttProvider;

/// `OpenAI` Whisper STT provider
pub struct WhisperProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    name: String,
}

impl WhisperProvider {
    pub fn new(name: impl Into<String>, client: Client, api_key: SecretString, base_url: &Url) -> Self {
        Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            api_key,
            name: name.into(),
        }
    }
}

#[derive(serde::Deserialize)]
struct WhisperResponse {
    text: String,
}

#[async_trait]
impl SttProvider for WhisperProvider {
    async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<Transcript> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        tracing::debug!(
            provider = %self.name,
            bytes = request.audio.len(),
            content_type = %request.audio.content_type,
            model = %request.model,
            "whisper transcription request"
        );

        let part = reqwest::multipart::Part::bytes(Vec::from(request.audio.data))
            .file_name(request.audio.filename)
            .mime_str(&request.audio.content_type)
            .map_err(|e| SttError::InvalidRequest(format!("invalid content type: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", request.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, error = %e, "whisper request failed");
                SttError::ConnectionError(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(provider = %self.name, %status, "whisper API error: {error_text}");

            return Err(match status.as_u16() {
                401 => SttError::AuthenticationFailed(error_text),
                400 | 415 => SttError::InvalidRequest(error_text),
                _ => SttError::ProviderApiError {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        let result: WhisperResponse = response.json().await.map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "failed to parse whisper response");
            SttError::InvalidResponse(e.to_string())
        })?;

        let text = result.text.trim();
        if text.is_empty() {
            return Err(SttError::EmptyTranscript);
        }

        tracing::debug!(provider = %self.name, chars = text.len(), "whisper transcription complete");

        Ok(Transcript::new(text))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
