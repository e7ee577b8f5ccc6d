//! In-Memory Knowledge Base Adapter
//!
//! Holds diagnosis data in memory.
//! Useful for testing and development.

use async_trait::async_trait;

use crate::domain::catalog::QuestionCatalog;
use crate::domain::inference::WeightModel;
use crate::ports::{KnowledgeBase, KnowledgeBaseError};

/// In-memory knowledge base
#[derive(Debug, Clone, Default)]
pub struct InMemoryKnowledgeBase {
    questions: QuestionCatalog,
    candidates: Vec<String>,
    model: WeightModel,
}

impl InMemoryKnowledgeBase {
    /// Create a knowledge base from already-built parts
    pub fn new(questions: QuestionCatalog, candidates: Vec<impl Into<String>>, model: WeightModel) -> Self {
        Self {
            questions,
            candidates: candidates.into_iter().map(Into::into).collect(),
            model,
        }
    }
}

#[async_trait]
impl KnowledgeBase for InMemoryKnowledgeBase {
    async fn load_questions(&self) -> Result<QuestionCatalog, KnowledgeBaseError> {
        Ok(self.questions.clone())
    }

    async fn load_candidates(&self) -> Result<Vec<String>, KnowledgeBaseError> {
        Ok(self.candidates.clone())
    }

    async fn load_model(&self) -> Result<WeightModel, KnowledgeBaseError> {
        Ok(self.model.clone())
    }
}
