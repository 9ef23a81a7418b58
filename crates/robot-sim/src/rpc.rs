//! HTTP endpoints

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::SimState;

/// GET /api/status
pub async fn get_status(State(state): State<Arc<SimState>>) -> impl IntoResponse {
    Json(state.status())
}
