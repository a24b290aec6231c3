//! The evaluation pipeline: transcribe, prompt, complete, parse

use std::sync::Arc;
use std::time::Duration;

use base64::{Engine as _, prelude::BASE64_STANDARD};
use orator_config::{CoachConfig, ProviderConfig};
use orator_core::{AudioPayload, http_client};
use orator_llm::{CompletionProvider, CompletionRequest, OpenAiProvider};
use secrecy::SecretString;
use stt::{SttProvider, TranscriptionRequest, WhisperProvider};
use tts::{OpenAiTtsProvider, SpeechRequest, SpeechResponse, TtsProvider, Voice};

use crate::error::{CoachError, Result};
use crate::evaluation::{EvaluationResult, parse_evaluation};
use crate::prompt::build_prompt;
use crate::task::TaskContext;

/// Name used in logs for the OpenAI-compatible backend
const PROVIDER_NAME: &str = "openai";

/// Voice of the simulated conversation partner
const REPLY_VOICE: Voice = Voice::Alloy;

/// Model identifiers sent upstream
#[derive(Debug, Clone)]
pub struct Models {
    pub transcription: String,
    pub completion: String,
    pub speech: String,
}

impl From<&ProviderConfig> for Models {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            transcription: config.transcription_model.clone(),
            completion: config.completion_model.clone(),
            speech: config.speech_model.clone(),
        }
    }
}

/// Runs evaluations against the configured providers
///
/// Immutable after construction and shared across requests.
pub struct Coach {
    transcriber: Arc<dyn SttProvider>,
    completer: Arc<dyn CompletionProvider>,
    synthesizer: Arc<dyn TtsProvider>,
    models: Models,
    settings: CoachConfig,
}

impl Coach {
    pub fn new(
        transcriber: Arc<dyn SttProvider>,
        completer: Arc<dyn CompletionProvider>,
        synthesizer: Arc<dyn TtsProvider>,
        models: Models,
        settings: CoachConfig,
    ) -> Self {
        Self {
            transcriber,
            completer,
            synthesizer,
            models,
            settings,
        }
    }

    /// Build a coach backed by one OpenAI-compatible API
    pub fn openai(provider: &ProviderConfig, settings: CoachConfig, api_key: &SecretString) -> anyhow::Result<Self> {
        let client = http_client(provider.timeout)?;

        let transcriber = WhisperProvider::new(PROVIDER_NAME, client.clone(), api_key.clone(), &provider.base_url);
        let completer = OpenAiProvider::new(PROVIDER_NAME, client.clone(), api_key.clone(), provider.base_url.clone());
        let synthesizer = OpenAiTtsProvider::new(PROVIDER_NAME, client, api_key.clone(), &provider.base_url);

        Ok(Self::new(
            Arc::new(transcriber),
            Arc::new(completer),
            Arc::new(synthesizer),
            Models::from(provider),
            settings,
        ))
    }

    /// Evaluate one recording for `task`
    ///
    /// Transcription and completion share the request timeout. For
    /// conversations the in-role reply is then voiced on a best-effort basis.
    pub async fn evaluate(&self, audio: AudioPayload, mut task: TaskContext) -> Result<EvaluationResult> {
        task.limit_history(self.settings.max_previous_exchanges);

        let mut result = tokio::time::timeout(self.settings.request_timeout, self.run(audio, &task))
            .await
            .map_err(|_| {
                CoachError::Upstream(format!(
                    "AI provider did not answer within {}",
                    seconds(self.settings.request_timeout)
                ))
            })??;

        if matches!(task, TaskContext::Conversation { .. }) {
            self.attach_reply_audio(&mut result).await;
        }

        Ok(result)
    }

    async fn run(&self, audio: AudioPayload, task: &TaskContext) -> Result<EvaluationResult> {
        let transcript = self
            .transcriber
            .transcribe(TranscriptionRequest {
                audio,
                model: self.models.transcription.clone(),
            })
            .await?;

        tracing::debug!(
            provider = self.transcriber.name(),
            task = task.name(),
            chars = transcript.as_str().len(),
            "transcribed recording"
        );

        let prompt = build_prompt(task, &transcript);
        let completion = self
            .completer
            .complete(&CompletionRequest::json(&self.models.completion, prompt))
            .await?;

        tracing::debug!(
            provider = self.completer.name(),
            model = %completion.model,
            "received evaluation"
        );

        parse_evaluation(&completion.content, &transcript, task)
    }

    /// Synthesize `text` with `voice`
    pub async fn synthesize(&self, text: String, voice: Voice) -> Result<SpeechResponse> {
        let speech = self
            .synthesizer
            .synthesize(SpeechRequest {
                model: self.models.speech.clone(),
                input: text,
                voice,
            })
            .await?;

        Ok(speech)
    }

    /// Voice the conversation reply and attach it as a data URL
    ///
    /// Failure only costs the audio; the evaluation is returned either way.
    async fn attach_reply_audio(&self, result: &mut EvaluationResult) {
        let Some(reply) = result.ai_response().filter(|reply| !reply.trim().is_empty()) else {
            return;
        };
        let reply = reply.to_owned();

        let timeout = self.settings.secondary_synthesis_timeout;
        match tokio::time::timeout(timeout, self.synthesize(reply, REPLY_VOICE)).await {
            Ok(Ok(speech)) => {
                result.set_ai_response_audio_url(format!(
                    "data:audio/mpeg;base64,{}",
                    BASE64_STANDARD.encode(&speech.audio)
                ));
            }
            Ok(Err(e)) => {
                tracing::warn!(provider = self.synthesizer.name(), error = %e, "could not voice conversation reply");
            }
            Err(_) => {
                tracing::warn!(
                    provider = self.synthesizer.name(),
                    timeout = %seconds(timeout),
                    "voicing conversation reply timed out"
                );
            }
        }
    }
}

fn seconds(duration: Duration) -> String {
    format!("{}s", duration.as_secs_f64())
}
