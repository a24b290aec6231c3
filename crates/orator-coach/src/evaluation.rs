//! Evaluation results and the parser that builds them from completion text

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use stt::Transcript;

use crate::error::{CoachError, Result};
use crate::task::TaskContext;

/// Score and commentary for one metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    #[serde(deserialize_with = "score")]
    pub score: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: String,
}

/// Fields only some task variants report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Extension {
    #[serde(rename_all = "camelCase")]
    Feedback { follow_up_question: String },
    #[serde(rename_all = "camelCase")]
    Story { strengths: Vec<String> },
    #[serde(rename_all = "camelCase")]
    Conversation {
        ai_response: String,
        alternative_responses: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        ai_response_audio_url: Option<String>,
    },
    Analysis {},
}

/// Result returned to the client for every evaluation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub transcribed_text: String,
    pub overall_score: u8,
    pub metrics: IndexMap<String, Metric>,
    pub feedback: String,
    pub improvements: Vec<String>,
    #[serde(flatten)]
    pub extension: Extension,
}

impl EvaluationResult {
    /// The simulated interlocutor's reply, for conversation results
    pub fn ai_response(&self) -> Option<&str> {
        match &self.extension {
            Extension::Conversation { ai_response, .. } => Some(ai_response),
            _ => None,
        }
    }

    /// Attach synthesized audio for the reply; ignored for other variants
    pub fn set_ai_response_audio_url(&mut self, url: String) {
        if let Extension::Conversation {
            ai_response_audio_url, ..
        } = &mut self.extension
        {
            *ai_response_audio_url = Some(url);
        }
    }
}

/// The completion's object before metrics are checked against the task
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvaluation {
    #[serde(deserialize_with = "score")]
    overall_score: u8,
    metrics: IndexMap<String, Value>,
    feedback: String,
    #[serde(default, deserialize_with = "null_as_default")]
    improvements: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    follow_up_question: String,
    #[serde(default, deserialize_with = "null_as_default")]
    strengths: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    ai_response: String,
    #[serde(default, deserialize_with = "null_as_default")]
    alternative_responses: Vec<String>,
}

/// Parse completion text into an evaluation for `task`
///
/// Metrics come back in the task's key order with unexpected keys dropped.
/// `transcribed_text` is always the authoritative transcript, never the
/// model's echo of it.
pub fn parse_evaluation(raw: &str, transcript: &Transcript, task: &TaskContext) -> Result<EvaluationResult> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| CoachError::MalformedResponse(format!("invalid JSON: {e}")))?;

    if !value.is_object() {
        return Err(CoachError::MalformedResponse("expected a JSON object".to_owned()));
    }

    let mut parsed = RawEvaluation::deserialize(value).map_err(|e| CoachError::MalformedResponse(e.to_string()))?;

    let mut metrics = IndexMap::new();
    for key in task.metric_keys() {
        let value = parsed
            .metrics
            .swap_remove(key)
            .ok_or_else(|| CoachError::MalformedResponse(format!("missing metric `{key}`")))?;

        let metric = Metric::deserialize(value)
            .map_err(|e| CoachError::MalformedResponse(format!("metric `{key}`: {e}")))?;

        metrics.insert(key.to_owned(), metric);
    }

    if !parsed.metrics.is_empty() {
        tracing::debug!(
            task = task.name(),
            dropped = ?parsed.metrics.keys().collect::<Vec<_>>(),
            "ignoring unexpected metrics"
        );
    }

    let extension = match task {
        TaskContext::Feedback { .. } => Extension::Feedback {
            follow_up_question: parsed.follow_up_question,
        },
        TaskContext::Story { .. } => Extension::Story {
            strengths: parsed.strengths,
        },
        TaskContext::Conversation { .. } => Extension::Conversation {
            ai_response: parsed.ai_response,
            alternative_responses: parsed.alternative_responses,
            ai_response_audio_url: None,
        },
        TaskContext::Analysis { .. } => Extension::Analysis {},
    };

    Ok(EvaluationResult {
        transcribed_text: transcript.as_str().to_owned(),
        overall_score: parsed.overall_score,
        metrics,
        feedback: parsed.feedback,
        improvements: parsed.improvements,
        extension,
    })
}

/// Accept any JSON number, rounded and clamped to 0..=100
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn score<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.round().clamp(0.0, 100.0) as u8)
}

/// Treat an explicit `null` like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
