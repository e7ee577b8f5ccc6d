//! Errors raised by an inference session.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Contract violations when applying an answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Question already answered: {0}")]
    AlreadyAnswered(String),

    #[error("Answer '{answer}' is not valid for question {question} (expected one of: {})", .expected.join(", "))]
    InvalidAnswer {
        question: String,
        answer: String,
        expected: Vec<String>,
    },
}

impl From<InferenceError> for DomainError {
    fn from(err: InferenceError) -> Self {
        match &err {
            InferenceError::UnknownQuestion(question) => {
                DomainError::new(ErrorCode::QuestionNotFound, err.to_string())
                    .with_detail("question", question.clone())
            }
            InferenceError::AlreadyAnswered(question) => {
                DomainError::new(ErrorCode::QuestionAlreadyAnswered, err.to_string())
                    .with_detail("question", question.clone())
            }
            InferenceError::InvalidAnswer {
                question, answer, ..
            } => DomainError::new(ErrorCode::AnswerOutOfDomain, err.to_string())
                .with_detail("question", question.clone())
                .with_detail("answer", answer.clone()),
        }
    }
}
