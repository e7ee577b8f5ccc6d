//! Inference Session - history/undo ledger and question selection.
//!
//! A session owns all mutable state of one diagnosis run. State changes only
//! through [`InferenceSession::answer_question`] and
//! [`InferenceSession::undo_last_answer`]; every other operation is a read.
//!
//! # Ordering
//!
//! Candidates and questions keep their construction order. Question selection
//! and answer-domain resolution break ties by that order, so identical call
//! sequences always select identical questions.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::entropy;
use super::{InferenceError, Score, ScoreBoard, Weight, WeightModel};

/// Default number of questions after which a session is done.
pub const DEFAULT_MAX_QUESTIONS: usize = 25;

/// Default length of the top-ranking list.
pub const DEFAULT_TOP_N: usize = 3;

/// An active candidate with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateScore {
    pub candidate: String,
    pub score: f64,
}

impl CandidateScore {
    fn new(candidate: &str, score: f64) -> Self {
        Self {
            candidate: candidate.to_string(),
            score,
        }
    }
}

/// Full observable state of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub scores: Vec<(String, Score)>,
    pub eliminations: Vec<(String, u32)>,
    pub prior_scores: Vec<(String, Option<f64>)>,
    pub answered: BTreeMap<String, String>,
    pub remaining: Vec<String>,
    pub history: Vec<String>,
}

/// One diagnosis run over a fixed candidate set, question set and model.
///
/// # Invariants
///
/// - `history` holds exactly the keys of `answered`, in answer order
/// - remaining questions are the questions not in `answered`
/// - a candidate is eliminated iff its elimination counter is positive
#[derive(Debug, Clone)]
pub struct InferenceSession {
    candidates: Vec<String>,
    questions: Vec<String>,
    model: WeightModel,
    board: ScoreBoard,
    answered: HashMap<String, String>,
    history: Vec<String>,
}

impl InferenceSession {
    /// Creates a session in its initial state.
    ///
    /// Duplicate candidate or question ids are dropped, keeping the first
    /// occurrence. Unmodelled (candidate, question) pairs are logged.
    pub fn new(candidates: Vec<String>, questions: Vec<String>, model: WeightModel) -> Self {
        let candidates = dedup_ordered(candidates, "candidate");
        let questions = dedup_ordered(questions, "question");

        for (candidate, question) in model.missing_weights(&candidates, &questions) {
            tracing::warn!(%candidate, %question, "model missing weights");
        }

        let board = ScoreBoard::new(candidates.len());
        tracing::debug!(
            candidates = candidates.len(),
            questions = questions.len(),
            "inference session initialised"
        );

        Self {
            candidates,
            questions,
            model,
            board,
            answered: HashMap::new(),
            history: Vec::new(),
        }
    }

    /// Returns to the initial state.
    pub fn reset(&mut self) {
        self.board = ScoreBoard::new(self.candidates.len());
        self.answered.clear();
        self.history.clear();
        tracing::debug!("session state reset");
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn model(&self) -> &WeightModel {
        &self.model
    }

    /// Answered questions, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn answered(&self) -> &HashMap<String, String> {
        &self.answered
    }

    pub fn answer_for(&self, question: &str) -> Option<&str> {
        self.answered.get(question).map(String::as_str)
    }

    /// Unanswered questions in construction order.
    pub fn remaining_questions(&self) -> Vec<&str> {
        self.questions
            .iter()
            .filter(|q| !self.answered.contains_key(q.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Score state of a candidate.
    pub fn score_of(&self, candidate: &str) -> Option<Score> {
        self.board.score(self.candidate_index(candidate)?)
    }

    /// Number of in-effect answers disqualifying a candidate.
    pub fn elimination_count(&self, candidate: &str) -> Option<u32> {
        self.board.elimination_count(self.candidate_index(candidate)?)
    }

    /// Answer labels valid for a question.
    pub fn possible_answers(&self, question: &str) -> Vec<String> {
        self.model.possible_answers(&self.candidates, question)
    }

    /// Applies an answer to every candidate and records it.
    ///
    /// # Errors
    ///
    /// - `UnknownQuestion` if the question is not part of this session
    /// - `AlreadyAnswered` if the question has an in-effect answer
    /// - `InvalidAnswer` if the answer is outside the question's domain
    pub fn answer_question(&mut self, question: &str, answer: &str) -> Result<(), InferenceError> {
        if !self.questions.iter().any(|q| q == question) {
            return Err(InferenceError::UnknownQuestion(question.to_string()));
        }
        if self.answered.contains_key(question) {
            return Err(InferenceError::AlreadyAnswered(question.to_string()));
        }
        let expected = self.possible_answers(question);
        if !expected.iter().any(|a| a == answer) {
            return Err(InferenceError::InvalidAnswer {
                question: question.to_string(),
                answer: answer.to_string(),
                expected,
            });
        }

        let weights = self.model.weights_for(&self.candidates, question, answer);
        for (index, weight) in weights.into_iter().enumerate() {
            self.board.apply(index, weight);
        }

        self.answered.insert(question.to_string(), answer.to_string());
        self.history.push(question.to_string());
        tracing::debug!(%question, %answer, answered = self.history.len(), "answer applied");
        Ok(())
    }

    /// Retracts the most recent answer.
    ///
    /// Returns the restored question, or `None` when nothing has been answered.
    pub fn undo_last_answer(&mut self) -> Option<String> {
        let Some(question) = self.history.pop() else {
            tracing::debug!("undo requested with empty history");
            return None;
        };
        let answer = self.answered.remove(&question)?;

        let weights = self.model.weights_for(&self.candidates, &question, &answer);
        for (index, weight) in weights.into_iter().enumerate() {
            self.board.revert(index, weight);
        }

        tracing::debug!(%question, %answer, "answer undone");
        Some(question)
    }

    /// Entropy of the current scores.
    pub fn entropy(&self) -> f64 {
        entropy::entropy(self.board.scores())
    }

    /// Expected entropy reduction from asking `question`.
    pub fn information_gain(&self, question: &str) -> f64 {
        let outcomes: Vec<Vec<Weight>> = self
            .possible_answers(question)
            .iter()
            .map(|answer| self.model.weights_for(&self.candidates, question, answer))
            .collect();

        let gain = entropy::information_gain(self.board.scores(), &outcomes);
        tracing::debug!(%question, gain, "information gain");
        gain
    }

    /// The unanswered question with the highest information gain.
    ///
    /// Ties go to the question that comes first in construction order.
    /// Returns `None` when every question has been answered.
    pub fn select_best_question(&self) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;

        for question in self.remaining_questions() {
            let gain = self.information_gain(question);
            if best.map_or(true, |(_, best_gain)| gain > best_gain) {
                best = Some((question, gain));
            }
        }

        match best {
            Some((question, gain)) => {
                tracing::debug!(%question, gain, "best next question");
                Some(question)
            }
            None => {
                tracing::debug!("no questions remain");
                None
            }
        }
    }

    /// Active candidates with their scores, in candidate order.
    pub fn scores(&self) -> Vec<CandidateScore> {
        self.candidates
            .iter()
            .zip(self.board.scores())
            .filter_map(|(candidate, score)| {
                score.value().map(|value| CandidateScore::new(candidate, value))
            })
            .collect()
    }

    /// The `n` highest-scoring active candidates.
    ///
    /// Equal scores keep candidate order.
    pub fn top_diseases(&self, n: usize) -> Vec<CandidateScore> {
        let mut ranked = self.scores();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(n);
        tracing::debug!(?ranked, "top diseases");
        ranked
    }

    /// Active scores relative to the highest active score.
    ///
    /// All values are `0.0` when the highest score is zero.
    pub fn progress(&self) -> Vec<CandidateScore> {
        let scores = self.scores();
        let max = scores
            .iter()
            .map(|s| s.score)
            .fold(f64::NEG_INFINITY, f64::max);

        scores
            .into_iter()
            .map(|s| {
                let relative = if max == 0.0 { 0.0 } else { s.score / max };
                CandidateScore::new(&s.candidate, relative)
            })
            .collect()
    }

    /// True once `max_questions` answers are in effect or no question remains.
    pub fn is_done(&self, max_questions: usize) -> bool {
        let done = self.history.len() >= max_questions || self.remaining_questions().is_empty();
        tracing::debug!(done, answered = self.history.len(), "is done?");
        done
    }

    /// Captures the full observable state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let indexed = self.candidates.iter().enumerate();
        SessionSnapshot {
            scores: indexed
                .clone()
                .map(|(i, c)| (c.clone(), self.board.scores()[i]))
                .collect(),
            eliminations: indexed
                .clone()
                .map(|(i, c)| (c.clone(), self.board.elimination_count(i).unwrap_or(0)))
                .collect(),
            prior_scores: indexed
                .map(|(i, c)| (c.clone(), self.board.prior_score(i)))
                .collect(),
            answered: self
                .answered
                .iter()
                .map(|(q, a)| (q.clone(), a.clone()))
                .collect(),
            remaining: self
                .remaining_questions()
                .into_iter()
                .map(str::to_string)
                .collect(),
            history: self.history.clone(),
        }
    }

    fn candidate_index(&self, candidate: &str) -> Option<usize> {
        self.candidates.iter().position(|c| c == candidate)
    }
}

fn dedup_ordered(ids: Vec<String>, kind: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if seen.insert(id.clone()) {
            unique.push(id);
        } else {
            tracing::warn!(%id, kind, "duplicate id ignored");
        }
    }
    unique
}
