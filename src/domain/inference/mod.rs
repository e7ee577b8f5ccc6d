//! Inference Module - adaptive questioning over a fixed set of diagnoses.
//!
//! # Components
//!
//! - `WeightModel` - candidate → question → answer weights, answer domains, model audit
//! - `ScoreBoard` - per-candidate scores with counted eliminations
//! - `entropy` - pure entropy and information-gain estimation
//! - `InferenceSession` - answer/undo ledger, question selection and ranking
//!
//! # Design Philosophy
//!
//! The session is single-threaded and deterministic: the same sequence of
//! calls always yields the same scores and the same selected questions.
//! Callers sharing a session across threads must serialize access themselves.

pub mod entropy;
mod errors;
mod score;
mod session;
mod weight_model;

pub use errors::InferenceError;
pub use score::{Score, ScoreBoard};
pub use session::{
    CandidateScore, InferenceSession, SessionSnapshot, DEFAULT_MAX_QUESTIONS, DEFAULT_TOP_N,
};
pub use weight_model::{
    AnswerWeights, ModelIssue, Weight, WeightModel, WeightModelBuilder, DEFAULT_ANSWERS,
    ELIMINATION_MARKER,
};
