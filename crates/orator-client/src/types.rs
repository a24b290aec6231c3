use bytes::Bytes;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A recorded utterance to upload
#[derive(Debug, Clone)]
pub struct Recording {
    pub data: Bytes,
    pub content_type: String,
    pub filename: String,
}

impl Recording {
    pub fn new(data: impl Into<Bytes>, content_type: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into(),
            filename: filename.into(),
        }
    }

    /// A browser-style `audio/webm` recording
    pub fn webm(data: impl Into<Bytes>) -> Self {
        Self::new(data, "audio/webm", "audio.webm")
    }
}

/// Debate practice: argue a position on a topic
#[derive(Debug, Clone, Default)]
pub struct FeedbackRequest {
    pub topic: String,
    pub context: Option<String>,
    pub previous_exchanges: Vec<String>,
}

/// Storytelling practice; empty criteria use the server's default rubric
#[derive(Debug, Clone, Default)]
pub struct StoryRequest {
    pub story_prompt: String,
    pub criteria: Vec<String>,
}

/// Role-play practice
#[derive(Debug, Clone, Default)]
pub struct ConversationRequest {
    pub scenario: String,
    pub role: String,
    pub previous_exchanges: Vec<String>,
}

/// Focus of a speech analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    Pronunciation,
    Intonation,
    Fluency,
    #[default]
    General,
}

impl AnalysisType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pronunciation => "pronunciation",
            Self::Intonation => "intonation",
            Self::Fluency => "fluency",
            Self::General => "general",
        }
    }
}

/// Read-aloud or prompted speech analysis
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub expected_text: String,
    pub analysis_type: AnalysisType,
}

/// Text-to-speech request body
#[derive(Debug, Clone, Serialize)]
pub struct SpeechRequest {
    pub text: String,
    /// One of alloy, echo, fable, onyx, nova, shimmer; server default is alloy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
        }
    }

    #[must_use]
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }
}

/// Score and commentary for one metric
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetricScore {
    pub score: u8,
    #[serde(default)]
    pub details: String,
}

/// Evaluation returned by every recording endpoint
///
/// Variant-specific fields are `None` for endpoints that do not report them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub transcribed_text: String,
    pub overall_score: u8,
    pub metrics: IndexMap<String, MetricScore>,
    pub feedback: String,
    #[serde(default)]
    pub improvements: Vec<String>,
    /// Debate feedback only
    #[serde(default)]
    pub follow_up_question: Option<String>,
    /// Story evaluation only
    #[serde(default)]
    pub strengths: Option<Vec<String>>,
    /// Conversation only: the simulated partner's reply
    #[serde(default)]
    pub ai_response: Option<String>,
    /// Conversation only
    #[serde(default)]
    pub alternative_responses: Option<Vec<String>>,
    /// Conversation only, present when the reply could be voiced
    #[serde(default)]
    pub ai_response_audio_url: Option<String>,
}

/// Synthesized speech
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    pub audio: Bytes,
    pub content_type: String,
}
