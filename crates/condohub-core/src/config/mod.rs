//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files and
//! environment variables via the `config` crate. Each sub-module represents
//! a logical configuration section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod revocation;
pub mod upstream;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, MAX_TOKEN_TTL_MINUTES};
pub use self::database::{DatabaseConfig, StoreProvider};
pub use self::logging::LoggingConfig;
pub use self::revocation::RevocationConfig;
pub use self::upstream::UpstreamConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// The top-level deserialization target for the merged configuration
/// (default.toml + environment overlay + `CONDOHUB__*` variables).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Identity and revocation store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Credential and token settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Revocation ledger housekeeping.
    #[serde(default)]
    pub revocation: RevocationConfig,
    /// Upstream REST API settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default.toml` with `config/{env}.toml` (both optional)
    /// and environment variables such as `CONDOHUB__AUTH__JWT_SECRET`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CONDOHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field requirements that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret must be set (CONDOHUB__AUTH__JWT_SECRET)",
            ));
        }
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&self.auth.token_ttl_minutes) {
            return Err(AppError::configuration(format!(
                "auth.token_ttl_minutes must be between 1 and {MAX_TOKEN_TTL_MINUTES}"
            )));
        }
        if self.database.provider == StoreProvider::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url must be set when database.provider is \"postgres\"",
            ));
        }
        if self.upstream.base_url.is_empty() {
            return Err(AppError::configuration("upstream.base_url must be set"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config_with_secret(secret: &str) -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                provider: StoreProvider::Memory,
                ..DatabaseConfig::default()
            },
            auth: AuthConfig {
                jwt_secret: secret.to_string(),
                ..AuthConfig::default()
            },
            revocation: RevocationConfig::default(),
            upstream: UpstreamConfig {
                base_url: "http://localhost:3000".to_string(),
                ..UpstreamConfig::default()
            },
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let err = config_with_secret("   ").validate().unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Configuration);
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(config_with_secret("a-long-enough-signing-secret").validate().is_ok());
    }

    #[test]
    fn test_token_ttl_is_bounded() {
        let mut config = config_with_secret("secret");
        config.auth.token_ttl_minutes = MAX_TOKEN_TTL_MINUTES;
        assert!(config.validate().is_ok());

        for minutes in [0, MAX_TOKEN_TTL_MINUTES + 1, u64::MAX] {
            config.auth.token_ttl_minutes = minutes;
            let err = config.validate().unwrap_err();
            assert_eq!(err.kind, crate::ErrorKind::Configuration, "{minutes}");
        }
    }

    #[test]
    fn test_postgres_requires_url() {
        let mut config = config_with_secret("secret");
        config.database.provider = StoreProvider::Postgres;
        config.database.url.clear();
        assert!(config.validate().is_err());
    }
}
