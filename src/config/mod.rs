//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `AIVO` prefix and nested values use double underscores as separators.
//! The flat data-location names `AIVO_DATA_DIR`, `AIVO_QUESTIONS_FILE`,
//! `AIVO_DISEASES_FILE` and `AIVO_DIAGNOSIS_MODEL_FILE` are honoured too, with
//! lower precedence than their nested forms.
//!
//! # Example
//!
//! ```no_run
//! use diagnosis_engine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Model file: {}", config.data.model_path().display());
//! ```

mod data;
mod error;
mod logging;
mod session;

pub use data::DataConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use session::SessionConfig;

use config::builder::{ConfigBuilder, DefaultState};
use serde::Deserialize;

/// Flat environment names for the data locations, mapped to config keys
const FLAT_DATA_VARS: [(&str, &str); 4] = [
    ("AIVO_DATA_DIR", "data.dir"),
    ("AIVO_QUESTIONS_FILE", "data.questions_file"),
    ("AIVO_DISEASES_FILE", "data.candidates_file"),
    ("AIVO_DIAGNOSIS_MODEL_FILE", "data.model_file"),
];

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Knowledge base file locations
    #[serde(default)]
    pub data: DataConfig,

    /// Session limits
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `AIVO` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `AIVO__DATA__DIR=/srv/kb` -> `data.dir = /srv/kb`
    /// - `AIVO__DATA__MODEL_FILE=...` -> `data.model_file = ...`
    /// - `AIVO_DIAGNOSIS_MODEL_FILE=...` -> `data.model_file = ...` (unless the nested form is set)
    /// - `AIVO__SESSION__MAX_QUESTIONS=10` -> `session.max_questions = 10`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = with_flat_data_vars(config::Config::builder())?
            .add_source(config::Environment::default().prefix("AIVO").separator("__"))
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
        self.data.validate()?;
        self.session.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Registers the flat data-location variables as defaults, so the nested
/// `AIVO__DATA__*` forms override them.
fn with_flat_data_vars(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    for (var, key) in FLAT_DATA_VARS {
        if let Ok(value) = std::env::var(var) {
            builder = builder.set_default(key, value)?;
        }
    }
    Ok(builder)
}
