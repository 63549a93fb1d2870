//! Health check endpoint.
//! Used by: server.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub agent_connected: bool,
    pub started_at: DateTime<Utc>,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        agent_connected: state.agent.as_ref().is_some_and(|a| a.is_connected()),
        started_at: state.started_at,
    })
}
