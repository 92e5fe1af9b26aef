//! # Student Records
//!
//! The record model, boundary validation and the file-backed store.

pub mod model;
pub mod store;
pub mod validation;

pub use model::{ClassSection, NewStudent, Student, StudentPatch, MAX_SCORE, MIN_SCORE};
pub use store::StudentStore;
pub use validation::{resolve_limit, ValidationError, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
