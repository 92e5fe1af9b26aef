//! Shared handler state

use std::path::Path;
use std::time::Duration;

use crate::evaluation::{EvaluationLog, Evaluator};
use crate::records::StudentStore;

/// Default file names inside the data directory
pub const STUDENTS_FILE: &str = "students.json";
pub const EVALUATION_LOG_FILE: &str = "evaluation_log.json";

/// State shared across all handlers
#[derive(Debug, Clone)]
pub struct ClassroomState {
    pub students: StudentStore,
    pub evaluations: EvaluationLog,
    pub evaluator: Evaluator,
}

impl ClassroomState {
    /// Wire a store, a log and an evaluator that writes through both
    pub fn new(students: StudentStore, evaluations: EvaluationLog, delay: Duration) -> Self {
        let evaluator = Evaluator::new(students.clone(), evaluations.clone(), delay);
        Self {
            students,
            evaluations,
            evaluator,
        }
    }

    /// State using the default file names under `data_dir`
    pub fn in_dir(data_dir: &Path, delay: Duration) -> Self {
        Self::new(
            StudentStore::open(data_dir.join(STUDENTS_FILE)),
            EvaluationLog::open(data_dir.join(EVALUATION_LOG_FILE)),
            delay,
        )
    }

    /// Replace the evaluator, keeping the store and log
    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }
}
