use bytes::Bytes;
use strum::{AsRefStr, Display, EnumString, VariantNames};

/// Voices offered by the speech provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, AsRefStr, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum Voice {
    #[default]
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

/// Speech synthesis request following the `OpenAI` TTS API format
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// Model identifier (e.g. "tts-1")
    pub model: String,
    /// Text to synthesize into speech
    pub input: String,
    /// Voice to speak with
    pub voice: Voice,
}

/// Raw audio returned by a TTS provider
#[derive(Debug, Clone)]
pub struct SpeechResponse {
    /// Encoded audio bytes
    pub audio: Bytes,
    /// Content type reported by the provider (e.g. "audio/mpeg")
    pub content_type: String,
}
