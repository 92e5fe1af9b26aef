//! HTTP error mapping
//!
//! Every rejection leaves the service as `{"error": "...", "code": N}`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::evaluation::EvaluationError;
use crate::observability::{log_event_with_fields, log_storage_error, Event};
use crate::persistence::StorageError;
use crate::records::ValidationError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Errors a handler can return
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Student not found")]
    NotFound(u64),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No fields to update")]
    EmptyPatch,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::Validation(e) => e.status_code(),
            ApiError::EmptyPatch => 400,
            ApiError::Storage(e) => e.status_code(),
        }
    }
}

impl From<EvaluationError> for ApiError {
    fn from(err: EvaluationError) -> Self {
        match err {
            EvaluationError::StudentNotFound(id) => ApiError::NotFound(id),
            EvaluationError::Storage(e) => ApiError::Storage(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(ValidationError::Malformed(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(ValidationError::Malformed(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(ValidationError::Malformed(rejection.body_text()))
    }
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
            code: err.status_code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Storage(e) => log_storage_error(e, "request"),
            other => {
                log_event_with_fields(
                    Event::RequestRejected,
                    &[
                        ("code", &other.status_code().to_string()),
                        ("error", &other.to_string()),
                    ],
                );
            }
        }

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NotFound(1).status_code(), 404);
        assert_eq!(ApiError::EmptyPatch.status_code(), 400);
        assert_eq!(
            ApiError::from(ValidationError::ScoreOutOfRange(101)).status_code(),
            422
        );
        assert_eq!(
            ApiError::from(EvaluationError::StudentNotFound(4)).status_code(),
            404
        );
    }

    #[test]
    fn test_error_body() {
        let body = ErrorResponse::from(&ApiError::EmptyPatch);
        assert_eq!(body.error, "No fields to update");
        assert_eq!(body.code, 400);
    }
}
