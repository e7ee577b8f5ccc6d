//! Question catalog - the text and answer choices shown for each question.
//!
//! The catalog is display-side data. Its order defines the question order
//! used by a session, which in turn decides tie-breaks in question selection.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::ValidationError;
use crate::domain::inference::DEFAULT_ANSWERS;

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "yesno")]
    YesNo,
    #[serde(rename = "multichoice")]
    MultiChoice,
}

/// A question as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    choices: Vec<String>,
}

impl Question {
    /// Creates a yes/no question.
    pub fn yes_no(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind: QuestionKind::YesNo,
            choices: DEFAULT_ANSWERS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Creates a question with custom answer choices.
    pub fn multi_choice(
        id: impl Into<String>,
        text: impl Into<String>,
        choices: Vec<impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind: QuestionKind::MultiChoice,
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    /// Declared choices, or `Yes`/`No` when none are declared.
    pub fn choices(&self) -> Vec<&str> {
        if self.choices.is_empty() {
            DEFAULT_ANSWERS.to_vec()
        } else {
            self.choices.iter().map(String::as_str).collect()
        }
    }

    /// Validates the question.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the id or text is blank
    /// - `InvalidFormat` if a multi-choice question declares no choices
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::empty_field("id"));
        }
        if self.text.trim().is_empty() {
            return Err(ValidationError::empty_field("text"));
        }
        if self.kind == QuestionKind::MultiChoice && self.choices.is_empty() {
            return Err(ValidationError::invalid_format(
                "choices",
                format!("multi-choice question '{}' declares no choices", self.id),
            ));
        }
        Ok(())
    }
}

/// Ordered collection of questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Question ids in catalog order.
    pub fn ids(&self) -> Vec<String> {
        self.questions.iter().map(|q| q.id.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Validates every question and rejects duplicate ids.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for question in &self.questions {
            question.validate()?;
            if !seen.insert(question.id.as_str()) {
                return Err(ValidationError::invalid_format(
                    "id",
                    format!("duplicate question id '{}'", question.id),
                ));
            }
        }
        Ok(())
    }
}
