//! Evaluation Task Tests
//!
//! Covers:
//! - an unknown student is rejected before anything is scheduled
//! - a completed evaluation writes clamp(old + delta) and one log entry
//! - a student gone by the time the task runs produces no writes
//! - scheduling returns before the task runs
//! - repeated evaluations each leave a log entry

use std::sync::Arc;
use std::time::Duration;

use classroom::evaluation::{
    EvaluationError, EvaluationLog, Evaluator, FixedDelta, MAX_DELTA, MIN_DELTA,
};
use classroom::records::{ClassSection, NewStudent, StudentStore};
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

struct Fixture {
    _dir: TempDir,
    store: StudentStore,
    log: EvaluationLog,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = StudentStore::open(dir.path().join("students.json"));
        let log = EvaluationLog::open(dir.path().join("evaluation_log.json"));
        Self {
            _dir: dir,
            store,
            log,
        }
    }

    fn evaluator(&self, delay: Duration) -> Evaluator {
        Evaluator::new(self.store.clone(), self.log.clone(), delay)
    }

    fn fixed_evaluator(&self, delay: Duration, delta: i32) -> Evaluator {
        self.evaluator(delay)
            .with_delta_source(Arc::new(FixedDelta(delta)))
    }
}

// =============================================================================
// Scheduling
// =============================================================================

#[tokio::test]
async fn test_unknown_student_rejected_synchronously() {
    let fx = Fixture::new();
    let evaluator = fx.evaluator(Duration::from_millis(1));

    let result = evaluator.schedule(1, None).await;
    assert!(matches!(result, Err(EvaluationError::StudentNotFound(1))));

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(fx.log.read_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_schedule_returns_before_delay_elapses() {
    let fx = Fixture::new();
    let s = fx
        .store
        .create(NewStudent::new("Olga Pike", ClassSection::B, 20))
        .await
        .unwrap();
    let evaluator = fx.fixed_evaluator(Duration::from_millis(300), 10);

    let scheduled = evaluator.schedule(s.id, None).await.unwrap();

    // Acknowledged with the untouched record; nothing written yet
    assert_eq!(scheduled.student.score, 20);
    assert!(!scheduled.handle.is_finished());
    assert!(fx.log.read_all().await.unwrap().is_empty());
    assert_eq!(fx.store.get(s.id).await.unwrap().unwrap().score, 20);

    scheduled.handle.await.unwrap();
    assert_eq!(fx.store.get(s.id).await.unwrap().unwrap().score, 30);
}

// =============================================================================
// Task outcome
// =============================================================================

#[tokio::test]
async fn test_alice_scenario() {
    let fx = Fixture::new();
    let alice = fx
        .store
        .create(NewStudent::new("Alice Example", ClassSection::A, 50))
        .await
        .unwrap();
    assert_eq!(alice.id, 1);
    assert!(!alice.is_expelled);

    let evaluator = fx.evaluator(Duration::from_millis(10));
    let scheduled = evaluator.schedule(1, None).await.unwrap();
    scheduled.handle.await.unwrap();

    let score = fx.store.get(1).await.unwrap().unwrap().score;
    assert!((45..=60).contains(&score), "score {} out of range", score);

    let entries = fx.log.read_all().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].student_id, 1);
    assert_eq!(entries[0].new_score, score);
    assert!((MIN_DELTA..=MAX_DELTA).contains(&entries[0].delta));
    assert_eq!(i32::from(score), 50 + entries[0].delta);
}

#[tokio::test]
async fn test_new_score_is_clamped_high() {
    let fx = Fixture::new();
    let s = fx
        .store
        .create(NewStudent::new("Pat Quinn", ClassSection::C, 97))
        .await
        .unwrap();

    let entry = fx
        .fixed_evaluator(Duration::ZERO, 10)
        .evaluate(s.id, Some("extra credit".into()))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(entry.delta, 10);
    assert_eq!(entry.new_score, 100);
    assert_eq!(entry.reason.as_deref(), Some("extra credit"));
    assert_eq!(fx.store.get(s.id).await.unwrap().unwrap().score, 100);
}

#[tokio::test]
async fn test_student_missing_at_run_time_is_silent_noop() {
    let fx = Fixture::new();
    let s = fx
        .store
        .create(NewStudent::new("Rae Stone", ClassSection::D, 40))
        .await
        .unwrap();
    let evaluator = fx.fixed_evaluator(Duration::from_millis(100), 5);

    let scheduled = evaluator.schedule(s.id, None).await.unwrap();

    // Records cannot be deleted through the service; drop it from the file
    fs::write(fx.store.path(), "[]").unwrap();

    scheduled.handle.await.unwrap();

    assert_eq!(fs::read_to_string(fx.store.path()).unwrap(), "[]");
    assert!(fx.log.read_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_task_failure_is_not_surfaced() {
    let fx = Fixture::new();
    let s = fx
        .store
        .create(NewStudent::new("Sam Tull", ClassSection::A, 40))
        .await
        .unwrap();
    let evaluator = fx.fixed_evaluator(Duration::from_millis(50), 5);

    let scheduled = evaluator.schedule(s.id, None).await.unwrap();
    fs::write(fx.store.path(), "garbage").unwrap();

    // The task swallows the storage error instead of panicking
    scheduled.handle.await.unwrap();
    assert!(fx.log.read_all().await.unwrap().is_empty());
}

// =============================================================================
// Repeated evaluations
// =============================================================================

#[tokio::test]
async fn test_each_completed_evaluation_appends_one_entry() {
    let fx = Fixture::new();
    let s = fx
        .store
        .create(NewStudent::new("Tia Upton", ClassSection::A, 50))
        .await
        .unwrap();
    let evaluator = fx.fixed_evaluator(Duration::from_millis(5), -5);

    for _ in 0..3 {
        let scheduled = evaluator.schedule(s.id, None).await.unwrap();
        scheduled.handle.await.unwrap();
    }

    let scores: Vec<u8> = fx
        .log
        .read_all()
        .await
        .unwrap()
        .iter()
        .map(|e| e.new_score)
        .collect();
    assert_eq!(scores, vec![45, 40, 35]);
    assert_eq!(fx.store.get(s.id).await.unwrap().unwrap().score, 35);
}
