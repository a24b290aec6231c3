//! Mock upstream AI provider for integration tests
//!
//! Implements the three OpenAI-compatible endpoints Orator calls:
//! transcriptions, chat completions and speech. Responses are canned and
//! every call is counted.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Bytes returned by the mock speech endpoint
pub const SPEECH_BYTES: &[u8] = b"ID3\x04\x00mock-mp3-frames";

/// What the mock answers with
#[derive(Debug, Clone)]
pub struct MockResponses {
    /// Text returned by the transcription endpoint
    pub transcript: String,
    /// Raw `message.content` of the completion
    pub completion: String,
    /// Answer speech requests with 500
    pub speech_fails: bool,
}

impl Default for MockResponses {
    fn default() -> Self {
        Self {
            transcript: "hello world".to_owned(),
            completion: evaluation(&["accuracy", "clarity", "delivery"], serde_json::json!({})),
            speech_fails: false,
        }
    }
}

/// A completion body scoring `keys`, merged with `extra` top-level fields
pub fn evaluation(keys: &[&str], extra: serde_json::Value) -> String {
    let metrics: serde_json::Map<String, serde_json::Value> = keys
        .iter()
        .map(|key| {
            (
                (*key).to_owned(),
                serde_json::json!({"score": 78, "details": format!("{key} is fine")}),
            )
        })
        .collect();

    let mut body = serde_json::json!({
        "transcribedText": "THE MODEL'S OWN TRANSCRIPT",
        "overallScore": 78,
        "metrics": metrics,
        "feedback": "Good effort.",
        "improvements": ["Vary your sentence length"],
    });

    if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        body.extend(extra.clone());
    }

    body.to_string()
}

/// Mock provider server
pub struct MockProvider {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    responses: MockResponses,
    transcription_count: AtomicU32,
    completion_count: AtomicU32,
    speech_count: AtomicU32,
    prompts: Mutex<Vec<String>>,
    voices: Mutex<Vec<String>>,
}

impl MockProvider {
    /// Start a mock with default responses
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(MockResponses::default()).await
    }

    /// Start a mock answering with `responses`
    pub async fn start_with(responses: MockResponses) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            responses,
            transcription_count: AtomicU32::new(0),
            completion_count: AtomicU32::new(0),
            speech_count: AtomicU32::new(0),
            prompts: Mutex::new(Vec::new()),
            voices: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/audio/transcriptions", routing::post(handle_transcription))
            .route("/v1/chat/completions", routing::post(handle_completion))
            .route("/v1/audio/speech", routing::post(handle_speech))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL including `/v1`, as the providers append their own paths
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn transcription_count(&self) -> u32 {
        self.state.transcription_count.load(Ordering::Relaxed)
    }

    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::Relaxed)
    }

    pub fn speech_count(&self) -> u32 {
        self.state.speech_count.load(Ordering::Relaxed)
    }

    /// Total upstream calls of any kind
    pub fn total_calls(&self) -> u32 {
        self.transcription_count() + self.completion_count() + self.speech_count()
    }

    /// Prompts received by the completion endpoint, in order
    pub fn prompts(&self) -> Vec<String> {
        self.state.prompts.lock().unwrap().clone()
    }

    /// Voices requested from the speech endpoint, in order
    pub fn voices(&self) -> Vec<String> {
        self.state.voices.lock().unwrap().clone()
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_transcription(State(state): State<Arc<MockState>>, mut form: Multipart) -> Response {
    state.transcription_count.fetch_add(1, Ordering::Relaxed);

    let mut model = None;
    let mut file_len = 0;
    while let Ok(Some(field)) = form.next_field().await {
        match field.name() {
            Some("model") => model = field.text().await.ok(),
            Some("file") => file_len = field.bytes().await.map(|b| b.len()).unwrap_or(0),
            _ => {}
        }
    }

    if model.is_none() || file_len == 0 {
        return (StatusCode::BAD_REQUEST, "missing file or model").into_response();
    }

    Json(serde_json::json!({ "text": state.responses.transcript })).into_response()
}

async fn handle_completion(
    State(state): State<Arc<MockState>>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.completion_count.fetch_add(1, Ordering::Relaxed);

    if body["response_format"]["type"] != "json_object" {
        return (StatusCode::BAD_REQUEST, "expected JSON mode").into_response();
    }

    if let Some(prompt) = body["messages"][0]["content"].as_str() {
        state.prompts.lock().unwrap().push(prompt.to_owned());
    }

    Json(serde_json::json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": body["model"],
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": state.responses.completion},
            "finish_reason": "stop"
        }]
    }))
    .into_response()
}

async fn handle_speech(State(state): State<Arc<MockState>>, Json(body): Json<serde_json::Value>) -> Response {
    state.speech_count.fetch_add(1, Ordering::Relaxed);

    if let Some(voice) = body["voice"].as_str() {
        state.voices.lock().unwrap().push(voice.to_owned());
    }

    if state.responses.speech_fails {
        return (StatusCode::INTERNAL_SERVER_ERROR, "speech backend unavailable").into_response();
    }

    ([(header::CONTENT_TYPE, "audio/mpeg")], SPEECH_BYTES).into_response()
}
