//! Foundation module - Shared domain primitives.
//!
//! Contains the error vocabulary shared by the diagnosis domain.

mod errors;

pub use errors::{DomainError, ErrorCode, ValidationError};
