//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::time::Duration;

use orator_config::{CoachConfig, Config, HealthConfig, ProviderConfig, ServerConfig};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults and no provider credential
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                provider: ProviderConfig::default(),
                coach: CoachConfig::default(),
                telemetry: None,
            },
        }
    }

    /// Point the provider at a mock backend with a test credential
    pub fn with_provider(mut self, base_url: &str) -> Self {
        self.config.provider.api_key = Some(SecretString::from("test-key"));
        self.config.provider.base_url = base_url.parse().expect("valid URL");
        self
    }

    /// Point the provider at a mock backend but leave the credential unset
    pub fn with_provider_without_credential(mut self, base_url: &str) -> Self {
        self.config.provider.api_key = None;
        self.config.provider.base_url = base_url.parse().expect("valid URL");
        self
    }

    /// Cap request bodies
    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.config.server.max_upload_bytes = bytes;
        self
    }

    /// Keep only this many prior exchanges in prompts
    pub fn with_max_previous_exchanges(mut self, max: usize) -> Self {
        self.config.coach.max_previous_exchanges = max;
        self
    }

    /// Bound the conversation reply synthesis
    pub fn with_secondary_synthesis_timeout(mut self, timeout: Duration) -> Self {
        self.config.coach.secondary_synthesis_timeout = timeout;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
