use std::sync::Arc;

use tg_concierge::Deps;
use tg_domain::config::Config;

/// Shared application state passed to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub deps: Arc<Deps>,
}
