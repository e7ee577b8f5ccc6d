//! Storage Adapters
//!
//! Implementations of the KnowledgeBase port.
//!
//! ## Available Adapters
//!
//! - **FileKnowledgeBase** - Reads JSON or YAML files from disk
//! - **InMemoryKnowledgeBase** - Holds data in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileKnowledgeBase, InMemoryKnowledgeBase};
//!
//! // Production: file-based knowledge base
//! let kb = FileKnowledgeBase::from_dir("./data");
//!
//! // Testing: in-memory knowledge base
//! let kb = InMemoryKnowledgeBase::new(catalog, candidates, model);
//! ```

mod file_knowledge_base;
mod in_memory_knowledge_base;

pub use file_knowledge_base::{FileKnowledgeBase, CANDIDATES_FILE, MODEL_FILE, QUESTIONS_FILE};
pub use in_memory_knowledge_base::InMemoryKnowledgeBase;
