#![allow(clippy::must_use_candidate)]

pub mod coach;
pub mod cors;
mod duration;
mod env;
pub mod health;
mod loader;
pub mod provider;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use coach::*;
pub use cors::*;
pub use health::*;
pub use provider::*;
pub use server::*;
pub use telemetry::{ExportProtocol, ExporterConfig, LogFormat, TelemetryConfig};

/// Top-level Orator configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream AI provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Evaluation pipeline tuning
    #[serde(default)]
    pub coach: CoachConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
