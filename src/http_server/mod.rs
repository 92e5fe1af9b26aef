//! # HTTP Server Module
//!
//! Axum front end for the classroom service.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/students` - Create and list students
//! - `/students/:id` - Fetch and update a student
//! - `/students/:id/evaluate` - Schedule a delayed evaluation
//! - `/students/:id/expel` - Expel a student
//! - `/evaluations` - Evaluation history

pub mod config;
pub mod errors;
pub mod evaluation_routes;
pub mod observability_routes;
pub mod server;
pub mod state;
pub mod student_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ErrorResponse};
pub use server::HttpServer;
pub use state::{ClassroomState, EVALUATION_LOG_FILE, STUDENTS_FILE};
