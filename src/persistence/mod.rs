//! # Persistence
//!
//! Whole-file JSON documents with an owned write guard. Both the student
//! collection and the evaluation log are stored this way.

pub mod document;
pub mod errors;

pub use document::{JsonDocument, WriteGuard};
pub use errors::{StorageError, StorageResult};
