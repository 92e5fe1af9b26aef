//! Evaluation history route

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::evaluation::EvaluationEntry;

use super::errors::ApiError;
use super::state::ClassroomState;

/// Create evaluation routes
pub fn evaluation_routes(state: Arc<ClassroomState>) -> Router {
    Router::new()
        .route("/evaluations", get(list_evaluations_handler))
        .with_state(state)
}

/// The whole log, oldest first
async fn list_evaluations_handler(
    State(state): State<Arc<ClassroomState>>,
) -> Result<Json<Vec<EvaluationEntry>>, ApiError> {
    Ok(Json(state.evaluations.read_all().await?))
}
