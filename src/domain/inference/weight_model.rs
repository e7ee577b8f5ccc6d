//! Weight Model - candidate → question → answer → evidence weight.
//!
//! The model is the static knowledge behind a diagnosis session. A weight of
//! exactly `-1` is reserved as the elimination marker; every other number is
//! additive evidence. Absent entries are neutral (`Evidence(0.0)`).

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use crate::domain::catalog::QuestionCatalog;

/// Serialized value reserved for "this answer disqualifies the candidate".
pub const ELIMINATION_MARKER: f64 = -1.0;

/// Answer domain used when no candidate models a question.
pub const DEFAULT_ANSWERS: [&str; 2] = ["Yes", "No"];

/// Effect of one answer on one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Weight {
    /// Additive evidence.
    Evidence(f64),
    /// Disqualifies the candidate until the answer is retracted.
    Eliminate,
}

impl Weight {
    /// The neutral weight used for missing model entries.
    pub const NEUTRAL: Weight = Weight::Evidence(0.0);

    /// Returns true for the elimination marker.
    pub fn is_elimination(&self) -> bool {
        matches!(self, Weight::Eliminate)
    }

    /// Numeric form as stored in model files.
    pub fn to_number(self) -> f64 {
        match self {
            Weight::Evidence(value) => value,
            Weight::Eliminate => ELIMINATION_MARKER,
        }
    }
}

impl From<f64> for Weight {
    fn from(value: f64) -> Self {
        if value == ELIMINATION_MARKER {
            Weight::Eliminate
        } else {
            Weight::Evidence(value)
        }
    }
}

impl Serialize for Weight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_number())
    }
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Weight::from)
    }
}

/// Answer labels and their weights for one (candidate, question) pair.
///
/// Entries keep the order in which they were declared, so the answer domain
/// shown to the user matches the model file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerWeights {
    entries: Vec<(String, Weight)>,
}

impl AnswerWeights {
    /// Creates an empty set of answer weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weight for an answer, replacing an existing entry in place.
    pub fn insert(&mut self, answer: impl Into<String>, weight: Weight) {
        let answer = answer.into();
        match self.entries.iter_mut().find(|(label, _)| *label == answer) {
            Some(entry) => entry.1 = weight,
            None => self.entries.push((answer, weight)),
        }
    }

    /// Gets the weight declared for an answer.
    pub fn get(&self, answer: &str) -> Option<Weight> {
        self.entries
            .iter()
            .find(|(label, _)| label == answer)
            .map(|(_, weight)| *weight)
    }

    /// Answer labels in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Serialize for AnswerWeights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, weight) in &self.entries {
            map.serialize_entry(label, weight)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AnswerWeights {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AnswerWeightsVisitor;

        impl<'de> Visitor<'de> for AnswerWeightsVisitor {
            type Value = AnswerWeights;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of answer labels to numeric weights")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut weights = AnswerWeights::new();
                while let Some((label, weight)) = access.next_entry::<String, Weight>()? {
                    weights.insert(label, weight);
                }
                Ok(weights)
            }
        }

        deserializer.deserialize_map(AnswerWeightsVisitor)
    }
}

/// A problem found while auditing a model against candidates and questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelIssue {
    /// The candidate has no entry at all.
    MissingCandidate { candidate: String },
    /// The candidate has no weights for a question.
    MissingQuestion { candidate: String, question: String },
    /// The candidate weights an answer the question does not offer.
    UndeclaredAnswer {
        candidate: String,
        question: String,
        answer: String,
    },
}

impl fmt::Display for ModelIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelIssue::MissingCandidate { candidate } => {
                write!(f, "model has no entry for {}", candidate)
            }
            ModelIssue::MissingQuestion { candidate, question } => {
                write!(f, "model missing weights for {}/{}", candidate, question)
            }
            ModelIssue::UndeclaredAnswer {
                candidate,
                question,
                answer,
            } => write!(
                f,
                "{}/{} weights answer '{}' which the question does not offer",
                candidate, question, answer
            ),
        }
    }
}

/// The full evidence model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightModel {
    weights: HashMap<String, HashMap<String, AnswerWeights>>,
}

impl WeightModel {
    /// Creates an empty model; every lookup is neutral.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing a model.
    pub fn builder() -> WeightModelBuilder {
        WeightModelBuilder::new()
    }

    /// Weight of `answer` to `question` for `candidate`, neutral when absent.
    pub fn weight(&self, candidate: &str, question: &str, answer: &str) -> Weight {
        self.answers(candidate, question)
            .and_then(|answers| answers.get(answer))
            .unwrap_or(Weight::NEUTRAL)
    }

    /// Weights of one answer for each candidate, in the given order.
    pub fn weights_for(&self, candidates: &[String], question: &str, answer: &str) -> Vec<Weight> {
        candidates
            .iter()
            .map(|candidate| self.weight(candidate, question, answer))
            .collect()
    }

    /// Declared answers for a (candidate, question) pair.
    pub fn answers(&self, candidate: &str, question: &str) -> Option<&AnswerWeights> {
        self.weights.get(candidate)?.get(question)
    }

    /// Returns true when the candidate declares at least one answer weight
    /// for the question.
    pub fn references(&self, candidate: &str, question: &str) -> bool {
        self.answers(candidate, question)
            .is_some_and(|answers| !answers.is_empty())
    }

    pub fn has_candidate(&self, candidate: &str) -> bool {
        self.weights.contains_key(candidate)
    }

    /// Resolves the answer domain of a question.
    ///
    /// Scans candidates in order and returns the labels of the first one that
    /// models the question, or [`DEFAULT_ANSWERS`] if none does.
    pub fn possible_answers(&self, candidates: &[String], question: &str) -> Vec<String> {
        candidates
            .iter()
            .find_map(|candidate| {
                self.answers(candidate, question)
                    .filter(|answers| !answers.is_empty())
            })
            .map(|answers| answers.labels().map(str::to_string).collect())
            .unwrap_or_else(|| DEFAULT_ANSWERS.iter().map(|s| s.to_string()).collect())
    }

    /// (candidate, question) pairs with no weights at all.
    pub fn missing_weights(&self, candidates: &[String], questions: &[String]) -> Vec<(String, String)> {
        let mut missing = Vec::new();
        for candidate in candidates {
            for question in questions {
                if self.answers(candidate, question).is_none() {
                    missing.push((candidate.clone(), question.clone()));
                }
            }
        }
        missing
    }

    /// Checks the model against the candidate list and question catalog.
    ///
    /// # Edge Cases
    /// - Candidate absent from the model: one `MissingCandidate`, no per-question issues
    /// - Questions without declared choices accept `Yes`/`No`
    pub fn audit(&self, candidates: &[String], catalog: &QuestionCatalog) -> Vec<ModelIssue> {
        let mut issues = Vec::new();

        for candidate in candidates {
            if !self.has_candidate(candidate) {
                issues.push(ModelIssue::MissingCandidate {
                    candidate: candidate.clone(),
                });
                continue;
            }

            for question in catalog.iter() {
                let Some(answers) = self.answers(candidate, &question.id) else {
                    issues.push(ModelIssue::MissingQuestion {
                        candidate: candidate.clone(),
                        question: question.id.clone(),
                    });
                    continue;
                };

                let choices = question.choices();
                for label in answers.labels() {
                    if !choices.contains(&label) {
                        issues.push(ModelIssue::UndeclaredAnswer {
                            candidate: candidate.clone(),
                            question: question.id.clone(),
                            answer: label.to_string(),
                        });
                    }
                }
            }
        }

        issues
    }
}

/// Builder for constructing WeightModel instances.
#[derive(Debug, Default)]
pub struct WeightModelBuilder {
    weights: HashMap<String, HashMap<String, AnswerWeights>>,
}

impl WeightModelBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a candidate with no weights.
    pub fn candidate(mut self, candidate: impl Into<String>) -> Self {
        self.weights.entry(candidate.into()).or_default();
        self
    }

    /// Adds a weight; `-1.0` is stored as the elimination marker.
    pub fn weight(
        mut self,
        candidate: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        value: f64,
    ) -> Self {
        self.weights
            .entry(candidate.into())
            .or_default()
            .entry(question.into())
            .or_default()
            .insert(answer, Weight::from(value));
        self
    }

    /// Marks an answer as disqualifying the candidate.
    pub fn eliminates(
        self,
        candidate: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        self.weight(candidate, question, answer, ELIMINATION_MARKER)
    }

    /// Builds the model.
    pub fn build(self) -> WeightModel {
        WeightModel {
            weights: self.weights,
        }
    }
}
