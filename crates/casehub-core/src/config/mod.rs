//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section; every field has a serde default so a partial file is enough.

pub mod access_code;
pub mod app;
pub mod auth;
pub mod database;
pub mod invite;
pub mod logging;
pub mod store;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use self::access_code::AccessCodeConfig;
pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::invite::InviteConfig;
pub use self::logging::LoggingConfig;
pub use self::store::{StoreBackend, StoreConfig};
pub use self::worker::WorkerConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Which store backend to run against.
    #[serde(default)]
    pub store: StoreConfig,
    /// Bearer-token verification settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Invitation settings.
    #[serde(default)]
    pub invite: InviteConfig,
    /// Access code settings.
    #[serde(default)]
    pub access_code: AccessCodeConfig,
    /// Background worker settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `CASEHUB__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CASEHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "[invite]\nttl_hours = 24\n[store]\nbackend = \"memory\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("deserialize");

        assert_eq!(config.invite.ttl_hours, 24);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.access_code.max_issue_attempts, 5);
    }

    #[test]
    fn test_default_invite_window_is_one_week() {
        let config = AppConfig::default();
        assert_eq!(config.invite.ttl().num_days(), 7);
    }
}
