use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::error::{OratorClientError, Result};
use crate::types::{
    AnalysisRequest, ConversationRequest, Evaluation, FeedbackRequest, Recording, SpeechAudio, SpeechRequest,
    StoryRequest,
};

/// Typed client for an Orator server
#[derive(Debug, Clone)]
pub struct OratorClient {
    base_url: Url,
    http: reqwest::Client,
}

impl OratorClient {
    /// Create a new client pointing at the given base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| OratorClientError::Config(format!("invalid base URL: {e}")))?;

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Use a preconfigured `reqwest` client (timeouts, proxies)
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Debate feedback on a spoken argument
    pub async fn ai_feedback(&self, recording: Recording, request: &FeedbackRequest) -> Result<Evaluation> {
        let mut form = audio_form(recording)?.text("topic", request.topic.clone());
        if let Some(context) = &request.context {
            form = form.text("context", context.clone());
        }
        form = with_list(form, "previousExchanges", &request.previous_exchanges)?;

        self.evaluate("/api/ai-feedback", form).await
    }

    /// Rubric-based evaluation of a spoken story
    pub async fn evaluate_story(&self, recording: Recording, request: &StoryRequest) -> Result<Evaluation> {
        let form = audio_form(recording)?.text("storyPrompt", request.story_prompt.clone());
        let form = with_list(form, "criteria", &request.criteria)?;

        self.evaluate("/api/evaluate-story", form).await
    }

    /// Role-play turn; the result carries the partner's reply
    pub async fn simulate_conversation(
        &self,
        recording: Recording,
        request: &ConversationRequest,
    ) -> Result<Evaluation> {
        let form = audio_form(recording)?
            .text("scenario", request.scenario.clone())
            .text("role", request.role.clone());
        let form = with_list(form, "previousExchanges", &request.previous_exchanges)?;

        self.evaluate("/api/simulate-conversation", form).await
    }

    /// Pronunciation, intonation, fluency or general analysis
    pub async fn analyze_speech(&self, recording: Recording, request: &AnalysisRequest) -> Result<Evaluation> {
        let form = audio_form(recording)?
            .text("expectedText", request.expected_text.clone())
            .text("type", request.analysis_type.as_str());

        self.evaluate("/api/speech-analysis-openai", form).await
    }

    /// Synthesize text to speech
    ///
    /// Returns raw audio bytes
    pub async fn text_to_speech(&self, request: &SpeechRequest) -> Result<SpeechAudio> {
        let url = make_url(&self.base_url, "/api/text-to-speech");

        let response = handle_error(self.http.post(url).json(request).send().await?).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_owned();

        Ok(SpeechAudio {
            audio: response.bytes().await?,
            content_type,
        })
    }

    async fn evaluate(&self, path: &str, form: Form) -> Result<Evaluation> {
        let url = make_url(&self.base_url, path);

        let response = handle_error(self.http.post(url).multipart(form).send().await?).await?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| OratorClientError::Parse(e.to_string()))
    }
}

fn audio_form(recording: Recording) -> Result<Form> {
    let part = Part::bytes(Vec::from(recording.data))
        .file_name(recording.filename)
        .mime_str(&recording.content_type)
        .map_err(|e| OratorClientError::Config(format!("invalid mime type: {e}")))?;

    Ok(Form::new().part("audio", part))
}

/// Attach a JSON-encoded list field, omitted when empty
fn with_list(form: Form, name: &'static str, items: &[String]) -> Result<Form> {
    if items.is_empty() {
        return Ok(form);
    }

    let encoded = serde_json::to_string(items).map_err(|e| OratorClientError::Parse(e.to_string()))?;
    Ok(form.text(name, encoded))
}

fn make_url(base_url: &Url, path: &str) -> Url {
    let mut url = base_url.clone();
    url.set_path(path);
    url
}

/// Check an HTTP response for errors
async fn handle_error(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(OratorClientError::Api {
        status: status.as_u16(),
        message: parse_error_body(&body),
    })
}

/// Extract the `error` message of an error body, falling back to the raw text
fn parse_error_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json["error"].as_str().map(str::to_owned))
        .unwrap_or_else(|| body.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_message_is_extracted() {
        assert_eq!(parse_error_body(r#"{"error": "`topic` is required"}"#), "`topic` is required");
        assert_eq!(parse_error_body("Bad Gateway"), "Bad Gateway");
        assert_eq!(parse_error_body(r#"{"message": "nope"}"#), r#"{"message": "nope"}"#);
    }

    #[test]
    fn urls_replace_base_path() {
        let base = Url::parse("http://127.0.0.1:3000/").unwrap();
        assert_eq!(
            make_url(&base, "/api/evaluate-story").as_str(),
            "http://127.0.0.1:3000/api/evaluate-story"
        );
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        assert!(matches!(OratorClient::new("not a url"), Err(OratorClientError::Config(_))));
    }
}
