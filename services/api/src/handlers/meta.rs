use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::state::AppState;

// ── GET /api ──────────────────────────────────────────────────────────────────

pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to FleetPulse API!" }))
}

// ── GET /readyz ───────────────────────────────────────────────────────────────

/// Ready once the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
