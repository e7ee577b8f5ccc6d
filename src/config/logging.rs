//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit engine debug events regardless of `log_level`
    #[serde(default)]
    pub debug: bool,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Filter directive with the debug override applied
    pub fn filter_directive(&self) -> String {
        if self.debug {
            format!("{},diagnosis_engine=debug", self.log_level)
        } else {
            self.log_level.clone()
        }
    }

    /// Validate logging configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(self.filter_directive())
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            debug: false,
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
