//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and `LEXIA__`-prefixed environment variables. Each sub-module
//! represents a logical configuration section.

pub mod app;
pub mod auth;
pub mod database;
pub mod folders;
pub mod logging;
pub mod translate;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::folders::FolderConfig;
pub use self::logging::LoggingConfig;
pub use self::translate::TranslateConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// configuration (default.toml + environment overlay + env vars).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Folder hierarchy settings.
    #[serde(default)]
    pub folders: FolderConfig,
    /// Translation provider settings.
    #[serde(default)]
    pub translate: TranslateConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merges `config/default`, the `config/{env}` overlay (both optional)
    /// and environment variables such as `LEXIA__DATABASE__URL`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("LEXIA")
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

    /// Configuration suitable for tests: every section at its defaults and
    /// a placeholder database URL that is never dialed.
    pub fn for_tests() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://localhost/lexia_test".to_string(),
                ..DatabaseConfig::default()
            },
            auth: AuthConfig {
                jwt_secret: "test-secret".to_string(),
                ..AuthConfig::default()
            },
            folders: FolderConfig::default(),
            translate: TranslateConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
