use std::time::Duration;

use serde::Deserialize;

/// Evaluation pipeline configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoachConfig {
    /// Upper bound for transcription plus completion of one request
    #[serde(default = "default_request_timeout", with = "crate::duration")]
    pub request_timeout: Duration,
    /// Upper bound for synthesizing the simulated reply of a conversation
    #[serde(default = "default_secondary_synthesis_timeout", with = "crate::duration")]
    pub secondary_synthesis_timeout: Duration,
    /// Most recent prior exchanges embedded in a prompt
    #[serde(default = "default_max_previous_exchanges")]
    pub max_previous_exchanges: usize,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            secondary_synthesis_timeout: default_secondary_synthesis_timeout(),
            max_previous_exchanges: default_max_previous_exchanges(),
        }
    }
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

const fn default_secondary_synthesis_timeout() -> Duration {
    Duration::from_secs(10)
}

const fn default_max_previous_exchanges() -> usize {
    10
}
