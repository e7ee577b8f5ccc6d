//! Knowledge Base Port - Interface for loading diagnosis data.
//!
//! A knowledge base supplies the three static inputs of a diagnosis session:
//! the ordered candidate list, the question catalog and the weight model.

use async_trait::async_trait;

use crate::domain::catalog::QuestionCatalog;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::inference::WeightModel;

/// Errors that can occur while loading a knowledge base
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeBaseError {
    #[error("Knowledge base source not found: {0}")]
    NotFound(String),

    #[error("Failed to parse {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid knowledge base: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<KnowledgeBaseError> for DomainError {
    fn from(err: KnowledgeBaseError) -> Self {
        let code = match &err {
            KnowledgeBaseError::NotFound(_) => ErrorCode::KnowledgeBaseNotFound,
            KnowledgeBaseError::ParseFailed { .. }
            | KnowledgeBaseError::UnsupportedFormat(_) => ErrorCode::InvalidFormat,
            KnowledgeBaseError::Invalid(_) => ErrorCode::ValidationFailed,
            KnowledgeBaseError::IoError(_) => ErrorCode::StorageError,
        };
        DomainError::new(code, err.to_string())
    }
}

/// Port for loading diagnosis data
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Load the question catalog, in presentation order
    ///
    /// # Errors
    /// Returns `KnowledgeBaseError` if the catalog cannot be read or parsed
    async fn load_questions(&self) -> Result<QuestionCatalog, KnowledgeBaseError>;

    /// Load the candidate (diagnosis) identifiers, in ranking order
    ///
    /// # Errors
    /// Returns `KnowledgeBaseError` if the list cannot be read or parsed
    async fn load_candidates(&self) -> Result<Vec<String>, KnowledgeBaseError>;

    /// Load the weight model
    ///
    /// # Errors
    /// Returns `KnowledgeBaseError` if the model cannot be read or parsed
    async fn load_model(&self) -> Result<WeightModel, KnowledgeBaseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knowledge_base_error_not_found() {
        let err = KnowledgeBaseError::NotFound("data/questions.json".to_string());
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("data/questions.json"));
    }

    #[test]
    fn test_knowledge_base_error_parse_failed() {
        let err = KnowledgeBaseError::ParseFailed {
            path: "model.yaml".to_string(),
            reason: "invalid type".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to parse model.yaml: invalid type");
    }

    #[test]
    fn test_knowledge_base_error_maps_to_domain_code() {
        let err: DomainError = KnowledgeBaseError::IoError("denied".to_string()).into();
        assert_eq!(err.code, ErrorCode::StorageError);
    }
}
