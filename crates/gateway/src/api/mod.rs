pub mod concierge;
pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the full API router.
pub fn router() -> Router<AppState> {
    Router::new()
        // Probes
        .route("/healthz", get(health::healthz))
        .route("/api/readiness", get(health::readiness))
        // Concierge
        .route("/api/concierge/chat/", post(concierge::chat))
        .route("/api/concierge/plan/", post(concierge::plan))
}
