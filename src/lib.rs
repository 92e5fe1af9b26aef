//! classroom - a file-backed student record service
//!
//! Students and the evaluation history each live in one JSON document that is
//! rewritten in full on every change. Evaluations run as detached Tokio tasks
//! after a fixed delay.

pub mod cli;
pub mod evaluation;
pub mod http_server;
pub mod observability;
pub mod persistence;
pub mod records;
