use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Upstream AI provider used for transcription, completion and speech
///
/// All three capabilities are served by one OpenAI-compatible API and
/// share its credential.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// API key; empty or absent leaves every evaluation endpoint unavailable
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL including the API version segment
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Speech-to-text model
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,
    /// Chat model used in JSON-object mode
    #[serde(default = "default_completion_model")]
    pub completion_model: String,
    /// Text-to-speech model
    #[serde(default = "default_speech_model")]
    pub speech_model: String,
    /// Transport timeout for a single upstream call
    #[serde(default = "default_timeout", with = "crate::duration")]
    pub timeout: Duration,
}

impl ProviderConfig {
    /// The configured API key, treating an empty value as missing
    pub fn credential(&self) -> Option<&SecretString> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            transcription_model: default_transcription_model(),
            completion_model: default_completion_model(),
            speech_model: default_speech_model(),
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("valid default URL")
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_completion_model() -> String {
    "gpt-4o".to_string()
}

fn default_speech_model() -> String {
    "tts-1".to_string()
}

const fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_openai() {
        let config: ProviderConfig = toml::from_str("").unwrap();

        assert!(config.credential().is_none());
        assert_eq!(config.base_url.as_str(), "https://api.openai.com/v1");
        assert_eq!(config.transcription_model, "whisper-1");
        assert_eq!(config.completion_model, "gpt-4o");
        assert_eq!(config.speech_model, "tts-1");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config: ProviderConfig = toml::from_str(r#"api_key = "  ""#).unwrap();
        assert!(config.credential().is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config: ProviderConfig = toml::from_str(
            r#"
            api_key = "sk-test"
            base_url = "http://127.0.0.1:9000/v1"
            completion_model = "gpt-4o-mini"
            timeout = "45s"
            "#,
        )
        .unwrap();

        assert_eq!(config.credential().map(|key| key.expose_secret()), Some("sk-test"));
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:9000/v1");
        assert_eq!(config.completion_model, "gpt-4o-mini");
        assert_eq!(config.timeout, Duration::from_secs(45));
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let err = toml::from_str::<ProviderConfig>(r#"timeout = "soon""#).unwrap_err();
        assert!(err.to_string().contains("invalid duration"));
    }
}
