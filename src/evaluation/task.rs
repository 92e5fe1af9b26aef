//! # Evaluation Task
//!
//! An evaluation request is checked against the store right away and then
//! handed to a detached Tokio task. After the configured delay the task
//! draws a delta, writes the new score through the student store and appends
//! the outcome to the evaluation log.
//!
//! The task is fire-and-forget. Its failures are logged and never reach the
//! caller, which has already been answered. The score write and the log
//! append are independent: a crash between them keeps the score and loses
//! the entry.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::observability::{log_event_with_fields, Event};
use crate::persistence::{StorageError, StorageResult};
use crate::records::{Student, StudentPatch, StudentStore};

use super::delta::{apply_delta, DeltaSource, UniformDelta};
use super::log::{EvaluationEntry, EvaluationLog};

/// Delay before a scheduled evaluation runs
pub const DEFAULT_EVALUATION_DELAY: Duration = Duration::from_secs(3);

/// Why an evaluation could not be scheduled
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("Student not found: {0}")]
    StudentNotFound(u64),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Accepted evaluation request
#[derive(Debug)]
pub struct Scheduled {
    /// The student as it was when the request was accepted
    pub student: Student,
    /// Completion of the detached task. Dropping it does not cancel the task.
    pub handle: JoinHandle<()>,
}

/// Schedules and runs evaluations
#[derive(Debug, Clone)]
pub struct Evaluator {
    store: StudentStore,
    log: EvaluationLog,
    delay: Duration,
    deltas: Arc<dyn DeltaSource>,
}

impl Evaluator {
    pub fn new(store: StudentStore, log: EvaluationLog, delay: Duration) -> Self {
        Self {
            store,
            log,
            delay,
            deltas: Arc::new(UniformDelta),
        }
    }

    /// Replace the delta source
    pub fn with_delta_source(mut self, deltas: Arc<dyn DeltaSource>) -> Self {
        self.deltas = deltas;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Accept an evaluation for `student_id` and spawn it.
    ///
    /// Rejected without scheduling anything if the student does not exist
    /// right now.
    pub async fn schedule(
        &self,
        student_id: u64,
        reason: Option<String>,
    ) -> Result<Scheduled, EvaluationError> {
        let student = self
            .store
            .get(student_id)
            .await?
            .ok_or(EvaluationError::StudentNotFound(student_id))?;

        let evaluator = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(evaluator.delay).await;
            evaluator.run(student_id, reason).await;
        });

        log_event_with_fields(
            Event::EvaluationScheduled,
            &[
                ("delay_ms", &self.delay.as_millis().to_string()),
                ("student_id", &student_id.to_string()),
            ],
        );

        Ok(Scheduled { student, handle })
    }

    async fn run(&self, student_id: u64, reason: Option<String>) {
        let id = student_id.to_string();
        match self.evaluate(student_id, reason).await {
            Ok(Some(entry)) => log_event_with_fields(
                Event::EvaluationApplied,
                &[
                    ("delta", &entry.delta.to_string()),
                    ("new_score", &entry.new_score.to_string()),
                    ("student_id", &id),
                ],
            ),
            Ok(None) => log_event_with_fields(Event::EvaluationSkipped, &[("student_id", &id)]),
            Err(e) => log_event_with_fields(
                Event::EvaluationFailed,
                &[("error", &e.to_string()), ("student_id", &id)],
            ),
        }
    }

    /// The body of an evaluation, without the delay.
    ///
    /// Returns `None` when the student no longer exists, in which case
    /// nothing is written anywhere.
    pub async fn evaluate(
        &self,
        student_id: u64,
        reason: Option<String>,
    ) -> StorageResult<Option<EvaluationEntry>> {
        let delta = self.deltas.draw();

        let Some(student) = self.store.get(student_id).await? else {
            return Ok(None);
        };

        let new_score = apply_delta(student.score, delta);
        if self
            .store
            .update(student_id, &StudentPatch::score(new_score))
            .await?
            .is_none()
        {
            return Ok(None);
        }

        let entry = EvaluationEntry {
            student_id,
            delta,
            new_score,
            reason,
            evaluated_at: Utc::now(),
        };
        self.log.append(entry.clone()).await?;

        Ok(Some(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::FixedDelta;
    use crate::records::{ClassSection, NewStudent};
    use tempfile::TempDir;

    fn evaluator(temp: &TempDir, delta: i32) -> (StudentStore, EvaluationLog, Evaluator) {
        let store = StudentStore::open(temp.path().join("students.json"));
        let log = EvaluationLog::open(temp.path().join("evaluation_log.json"));
        let evaluator = Evaluator::new(store.clone(), log.clone(), Duration::from_millis(5))
            .with_delta_source(Arc::new(FixedDelta(delta)));
        (store, log, evaluator)
    }

    #[tokio::test]
    async fn test_schedule_unknown_student_is_rejected() {
        let temp = TempDir::new().unwrap();
        let (_, log, evaluator) = evaluator(&temp, 3);

        let err = evaluator.schedule(9, None).await.unwrap_err();
        assert!(matches!(err, EvaluationError::StudentNotFound(9)));
        assert!(log.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scheduled_evaluation_updates_and_logs() {
        let temp = TempDir::new().unwrap();
        let (store, log, evaluator) = evaluator(&temp, 4);
        let s = store
            .create(NewStudent::new("Gil Hunt", ClassSection::C, 50))
            .await
            .unwrap();

        let scheduled = evaluator
            .schedule(s.id, Some("homework".into()))
            .await
            .unwrap();
        assert_eq!(scheduled.student.score, 50);

        scheduled.handle.await.unwrap();

        assert_eq!(store.get(s.id).await.unwrap().unwrap().score, 54);
        let entries = log.read_all().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].student_id, s.id);
        assert_eq!(entries[0].delta, 4);
        assert_eq!(entries[0].new_score, 54);
        assert_eq!(entries[0].reason.as_deref(), Some("homework"));
    }

    #[tokio::test]
    async fn test_evaluate_clamps_at_zero() {
        let temp = TempDir::new().unwrap();
        let (store, _, evaluator) = evaluator(&temp, -5);
        let s = store
            .create(NewStudent::new("Hal Ivey", ClassSection::A, 3))
            .await
            .unwrap();

        let entry = evaluator.evaluate(s.id, None).await.unwrap().unwrap();
        assert_eq!(entry.delta, -5);
        assert_eq!(entry.new_score, 0);
    }

    #[tokio::test]
    async fn test_evaluate_missing_student_is_noop() {
        let temp = TempDir::new().unwrap();
        let (store, log, evaluator) = evaluator(&temp, 10);

        assert!(evaluator.evaluate(1, None).await.unwrap().is_none());
        assert!(!store.path().exists());
        assert!(!log.path().exists());
    }
}
