use std::sync::Arc;

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use orator_config::{CoachConfig, ProviderConfig};

use crate::error::{CoachError, Result};
use crate::pipeline::Coach;

/// Shared state of the coaching endpoints
///
/// Holds no coach when the provider credential is missing. The endpoints
/// stay routable so callers get a configuration error instead of a 404.
#[derive(Clone, Default)]
pub struct CoachState {
    coach: Option<Arc<Coach>>,
}

impl CoachState {
    pub fn new(coach: Coach) -> Self {
        Self {
            coach: Some(Arc::new(coach)),
        }
    }

    /// State whose endpoints all report the missing credential
    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn from_config(provider: &ProviderConfig, settings: &CoachConfig) -> anyhow::Result<Self> {
        let Some(api_key) = provider.credential() else {
            tracing::warn!("provider.api_key is not set, coaching endpoints will answer with a configuration error");
            return Ok(Self::unconfigured());
        };

        let coach = Coach::openai(provider, settings.clone(), api_key)?;
        tracing::debug!(base_url = %provider.base_url, "coaching endpoints ready");

        Ok(Self::new(coach))
    }

    pub fn is_configured(&self) -> bool {
        self.coach.is_some()
    }

    pub fn coach(&self) -> Result<&Coach> {
        self.coach.as_deref().ok_or_else(CoachError::missing_credential)
    }
}

/// Reject requests before their body is read when no credential is configured
pub async fn require_credentials(state: CoachState, request: Request, next: Next) -> Response {
    match state.coach() {
        Ok(_) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}
