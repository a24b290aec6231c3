//! `OpenAI` chat completion API wire format types

use serde::{Deserialize, Serialize};

use crate::types::CompletionRequest;

// -- Request types --

/// `OpenAI` chat completion request
#[derive(Debug, Serialize)]
pub struct OpenAiRequest<'a> {
    /// Model identifier
    pub model: &'a str,
    /// Conversation messages
    pub messages: Vec<OpenAiMessage<'a>>,
    /// JSON mode constraint
    pub response_format: OpenAiResponseFormat,
}

/// `OpenAI` message within a request
#[derive(Debug, Serialize)]
pub struct OpenAiMessage<'a> {
    /// Message role
    pub role: &'static str,
    /// Plain text content
    pub content: &'a str,
}

/// `OpenAI` `response_format` object
#[derive(Debug, Serialize)]
pub struct OpenAiResponseFormat {
    #[serde(rename = "type")]
    pub format_type: &'static str,
}

impl<'a> From<&'a CompletionRequest> for OpenAiRequest<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            model: &request.model,
            messages: vec![OpenAiMessage {
                role: "user",
                content: &request.prompt,
            }],
            response_format: OpenAiResponseFormat {
                format_type: "json_object",
            },
        }
    }
}

// -- Response types --

/// `OpenAI` chat completion response
#[derive(Debug, Deserialize)]
pub struct OpenAiResponse {
    /// Model used
    #[serde(default)]
    pub model: String,
    /// Completion choices
    #[serde(default)]
    pub choices: Vec<OpenAiChoice>,
}

/// A single completion choice
#[derive(Debug, Deserialize)]
pub struct OpenAiChoice {
    /// Generated message
    pub message: OpenAiResponseMessage,
}

/// Assistant message within a choice
#[derive(Debug, Deserialize)]
pub struct OpenAiResponseMessage {
    /// Text content; null when the model refused or only called tools
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_mode_request_wire_shape() {
        let request = CompletionRequest::json("gpt-4o", "Score this answer.");
        let wire = OpenAiRequest::from(&request);

        assert_eq!(
            serde_json::to_value(&wire).unwrap(),
            serde_json::json!({
                "model": "gpt-4o",
                "messages": [{"role": "user", "content": "Score this answer."}],
                "response_format": {"type": "json_object"}
            })
        );
    }

    #[test]
    fn null_content_deserializes() {
        let response: OpenAiResponse = serde_json::from_str(
            r#"{"id":"x","model":"gpt-4o","choices":[{"index":0,"message":{"role":"assistant","content":null}}]}"#,
        )
        .unwrap();

        assert_eq!(response.choices.len(), 1);
        assert!(response.choices[0].message.content.is_none());
    }
}
