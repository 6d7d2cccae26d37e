//! Concierge API endpoints.
//!
//! - `POST /api/concierge/chat/`: wish in, `{ok, data: {recommendations}}` out
//! - `POST /api/concierge/plan/`: wish in, `{mode, main, nearby, route_hints}` out

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use tg_domain::concierge::ConciergeRequest;
use tg_domain::error::Error;

use crate::state::AppState;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /api/concierge/chat/
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ConciergeRequest>,
) -> impl IntoResponse {
    match tg_concierge::handle_chat(&body, &state.deps).await {
        Ok(data) => Json(serde_json::json!({ "ok": true, "data": data })).into_response(),
        Err(e) => error_response(e),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /api/concierge/plan/
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn plan(
    State(state): State<AppState>,
    Json(body): Json<ConciergeRequest>,
) -> impl IntoResponse {
    match tg_concierge::handle_plan(&body, &state.deps).await {
        Ok(data) => Json(serde_json::json!(data)).into_response(),
        Err(e) => error_response(e),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Error mapping
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Map a pipeline error to the wire: 400 for validation, 502 for upstream,
/// 500 for everything unexpected.
fn error_response(e: Error) -> Response {
    match e {
        Error::Validation(detail) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "detail": detail })),
        )
            .into_response(),
        Error::Upstream { .. } | Error::Timeout(_) | Error::Http(_) => (
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({
                "detail": "upstream provider unavailable",
                "error": e.to_string(),
            })),
        )
            .into_response(),
        other => {
            tracing::error!(error = %other, "concierge pipeline failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "detail": "internal error",
                    "error": other.to_string(),
                })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let resp = error_response(Error::Validation("query is required".into()));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_maps_to_502() {
        let resp = error_response(Error::places("status REQUEST_DENIED"));
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn unexpected_maps_to_500() {
        let resp = error_response(Error::Internal("boom".into()));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
