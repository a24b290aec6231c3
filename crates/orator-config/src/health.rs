use serde::Deserialize;

const DEFAULT_HEALTH_PATH: &str = "/health";

/// Liveness probe settings
///
/// The probe never touches the provider, so it keeps answering while the
/// credential is missing.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthConfig {
    pub enabled: bool,
    /// Route the probe is mounted on
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_HEALTH_PATH.to_owned(),
        }
    }
}
