//! Construction of the shared application state.

use std::sync::Arc;

use tg_concierge::Deps;
use tg_domain::config::Config;
use tg_places::{HttpPlacesClient, NoopTrace, PlacesClient};
use tg_providers::{ChatProvider, OpenAiCompatProvider};

use crate::state::AppState;

/// Wire up providers from config. A missing credential disables the
/// corresponding provider instead of failing startup; the pipeline
/// degrades gracefully without either.
pub fn build_app_state(config: Arc<Config>) -> AppState {
    let llm: Option<Arc<dyn ChatProvider>> = match OpenAiCompatProvider::from_config(&config.llm)
    {
        Ok(provider) => {
            tracing::info!(model = %config.llm.model, "llm planner enabled");
            Some(Arc::new(provider))
        }
        Err(e) => {
            tracing::info!(reason = %e, "llm planner disabled, order-based fallback only");
            None
        }
    };

    let places: Option<Arc<dyn PlacesClient>> =
        match HttpPlacesClient::from_config(&config.places, Arc::new(NoopTrace)) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                tracing::warn!(reason = %e, "places client disabled, no location backfill");
                None
            }
        };

    let deps = Deps {
        llm,
        llm_temperature: config.llm.temperature,
        llm_max_tokens: config.llm.max_tokens,
        places,
        nearby_radius_m: config.places.nearby_radius_m,
    };

    AppState {
        config,
        deps: Arc::new(deps),
    }
}
