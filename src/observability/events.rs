//! Observable events
//!
//! Every line the service logs names one of these.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Listening for requests
    Serving,
    /// Data directory created by `init`
    Initialized,

    // Record store
    StudentCreated,
    StudentUpdated,
    StudentExpelled,
    /// A request was turned away (not found, validation, empty patch)
    RequestRejected,

    // Evaluation
    EvaluationScheduled,
    EvaluationApplied,
    /// Target vanished before the task ran
    EvaluationSkipped,
    /// Task hit a storage error; nothing is reported to the client
    EvaluationFailed,

    // Storage
    /// A backing document could not be parsed
    StorageCorruption,
    /// A backing document could not be read or written
    StorageFailure,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "SERVICE_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "SERVICE_SERVING",
            Event::Initialized => "DATA_DIR_INITIALIZED",

            Event::StudentCreated => "STUDENT_CREATED",
            Event::StudentUpdated => "STUDENT_UPDATED",
            Event::StudentExpelled => "STUDENT_EXPELLED",
            Event::RequestRejected => "REQUEST_REJECTED",

            Event::EvaluationScheduled => "EVALUATION_SCHEDULED",
            Event::EvaluationApplied => "EVALUATION_APPLIED",
            Event::EvaluationSkipped => "EVALUATION_SKIPPED",
            Event::EvaluationFailed => "EVALUATION_FAILED",

            Event::StorageCorruption => "STORAGE_CORRUPTION",
            Event::StorageFailure => "STORAGE_FAILURE",
        }
    }

    /// Events logged at ERROR severity
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::EvaluationFailed | Event::StorageCorruption | Event::StorageFailure
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
