//! Session limits

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::inference::{DEFAULT_MAX_QUESTIONS, DEFAULT_TOP_N};

/// Limits applied to a diagnosis session
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Number of answers after which the session is done
    #[serde(default = "default_max_questions")]
    pub max_questions: usize,

    /// Number of ranked diagnoses to report
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl SessionConfig {
    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_questions == 0 {
            return Err(ValidationError::InvalidMaxQuestions);
        }
        if self.top_n == 0 {
            return Err(ValidationError::InvalidTopN);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_questions: default_max_questions(),
            top_n: default_top_n(),
        }
    }
}

fn default_max_questions() -> usize {
    DEFAULT_MAX_QUESTIONS
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}
