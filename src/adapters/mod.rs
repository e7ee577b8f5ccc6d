//! Adapters - Implementations of port interfaces and front-ends.
//!
//! - `storage` - Knowledge base sources (files on disk, in-memory)
//! - `console` - Line-oriented terminal front-end

pub mod console;
pub mod storage;

pub use console::Console;
pub use storage::{FileKnowledgeBase, InMemoryKnowledgeBase};
