//! # Student Store
//!
//! All students live in one JSON document. Every mutation is a full
//! read-modify-write of that document.
//!
//! Only the final write is taken under the document's guard. The read and the
//! merge happen outside it, so two concurrent updates of the same collection
//! can both read the old state and the later write wins, silently dropping
//! the earlier change. Readers take no guard at all.

use std::path::PathBuf;

use crate::observability::{log_event_with_fields, Event};
use crate::persistence::{JsonDocument, StorageResult, WriteGuard};

use super::model::{NewStudent, Student, StudentPatch};

/// File-backed student collection
#[derive(Debug, Clone)]
pub struct StudentStore {
    document: JsonDocument<Student>,
}

impl StudentStore {
    /// Store backed by `path` with its own write guard
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            document: JsonDocument::new(path),
        }
    }

    /// Store backed by `path` that serializes writes through `guard`
    pub fn with_guard(path: impl Into<PathBuf>, guard: WriteGuard) -> Self {
        Self {
            document: JsonDocument::with_guard(path, guard),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.document.path()
    }

    /// All students, highest score first. Equal scores keep insertion order.
    pub async fn list(&self) -> StorageResult<Vec<Student>> {
        let mut students = self.document.load().await?;
        students.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(students)
    }

    pub async fn get(&self, id: u64) -> StorageResult<Option<Student>> {
        let students = self.document.load().await?;
        Ok(students.into_iter().find(|s| s.id == id))
    }

    /// Insert under the next id (highest existing id + 1, or 1).
    pub async fn create(&self, candidate: NewStudent) -> StorageResult<Student> {
        let mut students = self.document.load().await?;
        let next_id = students.iter().map(|s| s.id).max().unwrap_or(0) + 1;

        let student = candidate.into_student(next_id);
        students.push(student.clone());
        self.document.store(&students).await?;

        log_event_with_fields(Event::StudentCreated, &[("id", &student.id.to_string())]);
        Ok(student)
    }

    /// Merge `patch` into the student with `id`. `None` if there is no such
    /// student, in which case nothing is written.
    pub async fn update(&self, id: u64, patch: &StudentPatch) -> StorageResult<Option<Student>> {
        let mut students = self.document.load().await?;

        let Some(student) = students.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        patch.apply_to(student);
        let updated = student.clone();

        self.document.store(&students).await?;

        log_event_with_fields(Event::StudentUpdated, &[("id", &id.to_string())]);
        Ok(Some(updated))
    }

    /// Set `is_expelled`. Returns whether the student exists; expelling twice
    /// is not an error.
    pub async fn mark_expelled(&self, id: u64) -> StorageResult<bool> {
        let mut students = self.document.load().await?;

        let Some(student) = students.iter_mut().find(|s| s.id == id) else {
            return Ok(false);
        };
        student.is_expelled = true;

        self.document.store(&students).await?;

        log_event_with_fields(Event::StudentExpelled, &[("id", &id.to_string())]);
        Ok(true)
    }
}
