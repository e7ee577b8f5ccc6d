//! Domain layer containing diagnosis logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors)
//! - `catalog` - Question text and answer choices
//! - `inference` - Inference session: scoring, elimination, entropy, question selection

pub mod catalog;
pub mod foundation;
pub mod inference;
