//! StartDiagnosisHandler - Loads a knowledge base and opens an inference session.

use std::sync::Arc;

use crate::domain::catalog::QuestionCatalog;
use crate::domain::foundation::DomainError;
use crate::domain::inference::{InferenceSession, ModelIssue};
use crate::ports::KnowledgeBase;

/// Result of starting a diagnosis.
#[derive(Debug, Clone)]
pub struct StartDiagnosisResult {
    pub session: InferenceSession,
    pub catalog: QuestionCatalog,
    pub issues: Vec<ModelIssue>,
}

/// Handler for starting a diagnosis session.
pub struct StartDiagnosisHandler {
    knowledge_base: Arc<dyn KnowledgeBase>,
}

impl StartDiagnosisHandler {
    pub fn new(knowledge_base: Arc<dyn KnowledgeBase>) -> Self {
        Self { knowledge_base }
    }

    /// Loads candidates, questions and weights, audits the model, and
    /// returns a fresh session.
    ///
    /// Model issues are logged and returned; they never abort the start.
    ///
    /// # Errors
    ///
    /// - Load failures, mapped from `KnowledgeBaseError`
    /// - `EmptyField` / `InvalidFormat` for a malformed question catalog
    pub async fn handle(&self) -> Result<StartDiagnosisResult, DomainError> {
        let catalog = self.knowledge_base.load_questions().await?;
        catalog.validate()?;
        let candidates = self.knowledge_base.load_candidates().await?;
        let model = self.knowledge_base.load_model().await?;

        let issues = model.audit(&candidates, &catalog);
        for issue in &issues {
            tracing::warn!(%issue, "knowledge base issue");
        }

        let session = InferenceSession::new(candidates, catalog.ids(), model);
        tracing::info!(
            candidates = session.candidates().len(),
            questions = session.questions().len(),
            issues = issues.len(),
            "diagnosis started"
        );

        Ok(StartDiagnosisResult {
            session,
            catalog,
            issues,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryKnowledgeBase;
    use crate::domain::catalog::Question;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::inference::WeightModel;
    use crate::ports::KnowledgeBaseError;
    use async_trait::async_trait;

    struct FailingKnowledgeBase;

    #[async_trait]
    impl KnowledgeBase for FailingKnowledgeBase {
        async fn load_questions(&self) -> Result<QuestionCatalog, KnowledgeBaseError> {
            Err(KnowledgeBaseError::NotFound("questions".to_string()))
        }

        async fn load_candidates(&self) -> Result<Vec<String>, KnowledgeBaseError> {
            Ok(vec![])
        }

        async fn load_model(&self) -> Result<WeightModel, KnowledgeBaseError> {
            Ok(WeightModel::empty())
        }
    }

    fn catalog() -> QuestionCatalog {
        QuestionCatalog::new(vec![
            Question::yes_no("red_eye", "Is the eye red?"),
            Question::yes_no("cloudy", "Is the cornea cloudy?"),
        ])
    }

    #[tokio::test]
    async fn starts_session_in_catalog_order() {
        let model = WeightModel::builder()
            .weight("A", "red_eye", "Yes", 1.0)
            .weight("A", "red_eye", "No", 0.0)
            .weight("A", "cloudy", "Yes", 1.0)
            .weight("A", "cloudy", "No", 0.0)
            .build();
        let kb = InMemoryKnowledgeBase::new(catalog(), vec!["A"], model);
        let handler = StartDiagnosisHandler::new(Arc::new(kb));

        let result = handler.handle().await.unwrap();

        assert_eq!(result.session.questions(), &["red_eye".to_string(), "cloudy".to_string()]);
        assert_eq!(result.session.candidates(), &["A".to_string()]);
        assert!(result.issues.is_empty());
        assert!(result.session.history().is_empty());
    }

    #[tokio::test]
    async fn reports_model_issues_without_failing() {
        let model = WeightModel::builder().weight("A", "red_eye", "Yes", 1.0).build();
        let kb = InMemoryKnowledgeBase::new(catalog(), vec!["A", "B"], model);
        let handler = StartDiagnosisHandler::new(Arc::new(kb));

        let result = handler.handle().await.unwrap();

        assert_eq!(
            result.issues,
            vec![
                ModelIssue::MissingQuestion {
                    candidate: "A".into(),
                    question: "cloudy".into(),
                },
                ModelIssue::MissingCandidate {
                    candidate: "B".into(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn propagates_load_errors() {
        let handler = StartDiagnosisHandler::new(Arc::new(FailingKnowledgeBase));
        let err = handler.handle().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::KnowledgeBaseNotFound);
        assert!(err.message.contains("questions"));
    }

    #[tokio::test]
    async fn rejects_duplicate_question_ids() {
        let catalog = QuestionCatalog::new(vec![
            Question::yes_no("red_eye", "Is the eye red?"),
            Question::yes_no("red_eye", "Is the eye still red?"),
        ]);
        let kb = InMemoryKnowledgeBase::new(catalog, vec!["A"], WeightModel::empty());
        let handler = StartDiagnosisHandler::new(Arc::new(kb));

        let err = handler.handle().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }
}
