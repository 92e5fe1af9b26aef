//! # Persistence Errors

use std::path::Path;

use thiserror::Error;

/// Result type for persistence operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised while reading or rewriting a backing document.
///
/// Every variant is fatal for the operation that hit it; nothing here is
/// retried.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Corrupt document {path}: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("Failed to encode document {path}: {reason}")]
    Encode { path: String, reason: String },
}

impl StorageError {
    pub(crate) fn io(path: &Path, err: std::io::Error) -> Self {
        StorageError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn corrupt(path: &Path, err: serde_json::Error) -> Self {
        StorageError::Corrupt {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn encode(path: &Path, err: serde_json::Error) -> Self {
        StorageError::Encode {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn interrupted(path: &Path, err: tokio::task::JoinError) -> Self {
        StorageError::Io {
            path: path.display().to_string(),
            reason: format!("write task failed: {}", err),
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        500
    }

    /// Whether the backing file itself is unreadable as a document
    pub fn is_corruption(&self) -> bool {
        matches!(self, StorageError::Corrupt { .. })
    }
}
