/// A single-turn completion request
///
/// The model is always asked for a single JSON object.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,
    /// The user prompt
    pub prompt: String,
}

impl CompletionRequest {
    /// Request a JSON-object completion for `prompt`
    pub fn json(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
        }
    }
}

/// Raw text of the top completion choice
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Model that produced the completion, as reported by the provider
    pub model: String,
    /// Completion text, unparsed
    pub content: String,
}
