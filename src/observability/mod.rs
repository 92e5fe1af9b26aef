//! Observability for the classroom service
//!
//! - Structured logging (one JSON object per line)
//! - Typed lifecycle and domain events
//!
//! ```ignore
//! use classroom::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::StudentCreated, &[("id", "1")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

use crate::persistence::StorageError;

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log an event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Error
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}

/// Log a storage error under the event matching its kind
pub fn log_storage_error(err: &StorageError, operation: &str) {
    let event = if err.is_corruption() {
        Event::StorageCorruption
    } else {
        Event::StorageFailure
    };
    let message = err.to_string();
    log_event_with_fields(event, &[("operation", operation), ("error", &message)]);
}
