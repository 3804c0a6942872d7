//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `CAR_EXPERT`
//! prefix and `__` (double underscore) separating nested sections.
//!
//! # Example
//!
//! ```no_run
//! use car_expert_client::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Engine at {}", config.engine.base_url);
//! ```

mod engine;
mod error;

pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Diagnosis engine configuration (endpoint, timeout, domain policy)
    #[serde(default)]
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present (development), then reads environment
    /// variables with the `CAR_EXPERT` prefix:
    ///
    /// - `CAR_EXPERT__ENGINE__BASE_URL=https://...` -> `engine.base_url`
    /// - `CAR_EXPERT__ENGINE__TIMEOUT_SECS=30` -> `engine.timeout_secs`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CAR_EXPERT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.engine.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_engine_config_validates() {
        let config = AppConfig {
            engine: EngineConfig::default(),
        };
        assert!(config.validate().is_ok());
    }
}
