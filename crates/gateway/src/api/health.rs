//! Liveness and readiness probes.
//!
//! - `GET /healthz`: process is up
//! - `GET /api/readiness`: which upstream providers are configured

use axum::extract::State;
use axum::response::{IntoResponse, Json};

use crate::state::AppState;

pub async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "llm": state.deps.llm.is_some(),
        "places": state.deps.places.is_some(),
    }))
}
