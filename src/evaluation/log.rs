//! # Evaluation Log
//!
//! Append-only history of completed evaluations, stored as one JSON array.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::persistence::{JsonDocument, StorageResult, WriteGuard};

/// One completed evaluation. Never modified once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationEntry {
    /// Weak reference: the student is not required to still exist
    pub student_id: u64,
    pub delta: i32,
    pub new_score: u8,
    #[serde(default)]
    pub reason: Option<String>,
    pub evaluated_at: DateTime<Utc>,
}

/// Appender for the evaluation history.
///
/// Unlike the student store, `append` holds the guard across the whole
/// read-append-write, so concurrent appends never lose entries.
#[derive(Debug, Clone)]
pub struct EvaluationLog {
    document: JsonDocument<EvaluationEntry>,
}

impl EvaluationLog {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            document: JsonDocument::new(path),
        }
    }

    pub fn with_guard(path: impl Into<PathBuf>, guard: WriteGuard) -> Self {
        Self {
            document: JsonDocument::with_guard(path, guard),
        }
    }

    pub fn path(&self) -> &Path {
        self.document.path()
    }

    pub async fn append(&self, entry: EvaluationEntry) -> StorageResult<()> {
        let held = self.document.guard().acquire_owned().await;

        let mut entries = self.document.load().await?;
        entries.push(entry);
        self.document.store_locked(&entries, held).await
    }

    /// Every entry in append order; empty when the file does not exist
    pub async fn read_all(&self) -> StorageResult<Vec<EvaluationEntry>> {
        self.document.load().await
    }
}
