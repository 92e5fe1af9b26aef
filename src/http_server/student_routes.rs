//! Student HTTP Routes
//!
//! Create, list, fetch, update and expel students, and trigger evaluations.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::records::{resolve_limit, NewStudent, Student, StudentPatch};

use super::errors::ApiError;
use super::state::ClassroomState;

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Default, Deserialize)]
pub struct ListStudentsQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EvaluateQuery {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct EvaluationScheduledResponse {
    pub detail: String,
    pub student: Student,
}

// ==================
// Student Routes
// ==================

/// Create student routes
pub fn student_routes(state: Arc<ClassroomState>) -> Router {
    Router::new()
        .route("/students", get(list_students_handler).post(create_student_handler))
        .route("/students/", get(list_students_handler).post(create_student_handler))
        .route(
            "/students/:id",
            get(get_student_handler).put(update_student_handler),
        )
        .route("/students/:id/evaluate", post(evaluate_student_handler))
        .route("/students/:id/expel", post(expel_student_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn create_student_handler(
    State(state): State<Arc<ClassroomState>>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let Json(candidate) = payload?;
    candidate.validate()?;

    let student = state.students.create(candidate).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

async fn list_students_handler(
    State(state): State<Arc<ClassroomState>>,
    query: Result<Query<ListStudentsQuery>, QueryRejection>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let Query(query) = query?;
    let limit = resolve_limit(query.limit)?;

    let mut students = state.students.list().await?;
    students.truncate(limit);
    Ok(Json(students))
}

async fn get_student_handler(
    State(state): State<Arc<ClassroomState>>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Student>, ApiError> {
    let Path(id) = id?;

    state
        .students
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

async fn update_student_handler(
    State(state): State<Arc<ClassroomState>>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<StudentPatch>, JsonRejection>,
) -> Result<Json<Student>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = payload?;

    patch.validate()?;
    if patch.is_empty() {
        return Err(ApiError::EmptyPatch);
    }

    state
        .students
        .update(id, &patch)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

async fn evaluate_student_handler(
    State(state): State<Arc<ClassroomState>>,
    id: Result<Path<u64>, PathRejection>,
    query: Result<Query<EvaluateQuery>, QueryRejection>,
) -> Result<Json<EvaluationScheduledResponse>, ApiError> {
    let Path(id) = id?;
    let Query(query) = query?;

    // The task handle is dropped; the evaluation keeps running detached
    let scheduled = state.evaluator.schedule(id, query.reason).await?;

    Ok(Json(EvaluationScheduledResponse {
        detail: "Evaluation scheduled".to_string(),
        student: scheduled.student,
    }))
}

async fn expel_student_handler(
    State(state): State<Arc<ClassroomState>>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<DetailResponse>, ApiError> {
    let Path(id) = id?;

    if !state.students.mark_expelled(id).await? {
        return Err(ApiError::NotFound(id));
    }

    Ok(Json(DetailResponse {
        detail: "Student expelled".to_string(),
    }))
}
