use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{
    error::TtsError,
    types::{SpeechRequest, SpeechResponse},
};

use super::TtsProvider;

/// `OpenAI` TTS provider
pub struct OpenAiTtsProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    name: String,
}

impl OpenAiTtsProvider {
    pub fn new(name: impl Into<String>, client: Client, api_key: SecretString, base_url: &Url) -> Self {
        Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            api_key,
            name: name.into(),
        }
    }
}

#[derive(serde::Serialize)]
struct OpenAiTtsRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

#[async_trait]
impl TtsProvider for OpenAiTtsProvider {
    async fn synthesize(&self, request: SpeechRequest) -> crate::error::Result<SpeechResponse> {
        let url = format!("{}/audio/speech", self.base_url);

        tracing::debug!(
            provider = %self.name,
            model = %request.model,
            voice = %request.voice,
            input_len = request.input.len(),
            "openai tts request"
        );

        let body = OpenAiTtsRequest {
            model: &request.model,
            input: &request.input,
            voice: request.voice.as_ref(),
            response_format: "mp3",
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, error = %e, "openai tts request failed");
                TtsError::ConnectionError(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(provider = %self.name, %status, "openai tts API error: {error_text}");

            return Err(match status.as_u16() {
                401 => TtsError::AuthenticationFailed(error_text),
                400 => TtsError::InvalidRequest(error_text),
                _ => TtsError::ProviderApiError {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "failed to read openai tts response body");
            TtsError::InvalidResponse(e.to_string())
        })?;

        if audio.is_empty() {
            return Err(TtsError::InvalidResponse("provider returned no audio".to_owned()));
        }

        tracing::debug!(provider = %self.name, bytes = audio.len(), "openai tts synthesis complete");

        Ok(SpeechResponse { audio, content_type })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
