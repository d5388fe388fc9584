//! Application configuration
//!
//! Loaded from environment variables with the `GRIEVANCE_DESK` prefix;
//! nested values use `__` as separator. A `.env` file is read first when
//! present.
//!
//! - `GRIEVANCE_DESK__SERVER__PORT=8080` -> `server.port = 8080`
//! - `GRIEVANCE_DESK__DATABASE__URL=...` -> `database.url = ...`
//! - `GRIEVANCE_DESK__LIFECYCLE__MAX_TRANSITION_RETRIES=5`
//!
//! ```no_run
//! use grievance_desk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod lifecycle;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use lifecycle::LifecycleConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL; in-memory stores are used when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub lifecycle: LifecycleConfig,
}

impl AppConfig {
    /// Loads `.env` if present, then the prefixed environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GRIEVANCE_DESK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.lifecycle.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
