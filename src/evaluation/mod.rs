//! # Evaluations
//!
//! Delayed, detached score adjustments and their append-only history.

pub mod delta;
pub mod log;
pub mod task;

pub use delta::{apply_delta, DeltaSource, FixedDelta, UniformDelta, MAX_DELTA, MIN_DELTA};
pub use log::{EvaluationEntry, EvaluationLog};
pub use task::{EvaluationError, Evaluator, Scheduled, DEFAULT_EVALUATION_DELAY};
