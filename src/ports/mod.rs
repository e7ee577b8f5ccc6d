//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `KnowledgeBase` - Source of candidates, question catalog and weight model

mod knowledge_base;

pub use knowledge_base::{KnowledgeBase, KnowledgeBaseError};
