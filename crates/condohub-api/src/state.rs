//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use condohub_auth::SessionAuthority;
use condohub_core::config::AppConfig;
use condohub_upstream::UpstreamApi;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Register, login, logout, authenticate.
    pub authority: Arc<SessionAuthority>,
    /// Upstream API the CRUD routes forward to.
    pub upstream: Arc<dyn UpstreamApi>,
}

impl AppState {
    /// Creates the state from its parts.
    pub fn new(
        config: Arc<AppConfig>,
        authority: Arc<SessionAuthority>,
        upstream: Arc<dyn UpstreamApi>,
    ) -> Self {
        Self {
            config,
            authority,
            upstream,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("authority", &self.authority)
            .finish()
    }
}
