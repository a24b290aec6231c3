use strum::{AsRefStr, Display, EnumString};

use crate::rubric::Rubric;

/// Focus of a speech analysis exercise
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AnalysisKind {
    Pronunciation,
    Intonation,
    Fluency,
    #[default]
    General,
}

impl AnalysisKind {
    /// Parse the `type` form field; absent or unrecognized values mean general
    pub fn from_field(value: Option<&str>) -> Self {
        value
            .map(str::trim)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Metric keys scored for this kind, in report order
    pub const fn metric_keys(self) -> &'static [&'static str] {
        match self {
            Self::Pronunciation => &["accuracy", "clarity", "intonation"],
            Self::Intonation => &["intonation", "rhythm", "naturalness"],
            Self::Fluency => &["pace", "fluency", "complexity", "vocabulary"],
            Self::General => &["accuracy", "clarity", "delivery"],
        }
    }
}

const FEEDBACK_METRICS: &[&str] = &["clarity", "reasoning", "vocabulary", "persuasiveness"];
const CONVERSATION_METRICS: &[&str] = &["appropriateness", "clarity", "vocabulary", "cultural_awareness"];

/// What the learner was asked to do, and everything the prompt needs about it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskContext {
    /// Argue a position on a debate topic
    Feedback {
        topic: String,
        context: Option<String>,
        previous_exchanges: Vec<String>,
    },
    /// Tell a story from a prompt, scored against a rubric
    Story { story_prompt: String, rubric: Rubric },
    /// Respond in a role-play scenario
    Conversation {
        scenario: String,
        role: String,
        previous_exchanges: Vec<String>,
    },
    /// Read or respond to an expected text
    Analysis { expected_text: String, kind: AnalysisKind },
}

impl TaskContext {
    /// Short name for logs
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Feedback { .. } => "feedback",
            Self::Story { .. } => "story",
            Self::Conversation { .. } => "conversation",
            Self::Analysis { .. } => "analysis",
        }
    }

    /// Metric keys the evaluation must report, in order
    pub fn metric_keys(&self) -> Vec<&str> {
        match self {
            Self::Feedback { .. } => FEEDBACK_METRICS.to_vec(),
            Self::Conversation { .. } => CONVERSATION_METRICS.to_vec(),
            Self::Story { rubric, .. } => rubric.keys().collect(),
            Self::Analysis { kind, .. } => kind.metric_keys().to_vec(),
        }
    }

    /// Keep only the `max` most recent prior exchanges
    pub fn limit_history(&mut self, max: usize) {
        if let Self::Feedback {
            previous_exchanges, ..
        }
        | Self::Conversation {
            previous_exchanges, ..
        } = self
        {
            let excess = previous_exchanges.len().saturating_sub(max);
            previous_exchanges.drain(..excess);
        }
    }
}
