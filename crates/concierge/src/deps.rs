//! The injected dependency bundle.

use std::sync::Arc;

use tg_places::PlacesClient;
use tg_providers::ChatProvider;

/// Everything the pipeline reaches outward through.
///
/// Both providers are optional: without an LLM the planner takes the
/// deterministic fallback, without Places the backfill simply leaves
/// unresolvable locations unset.
#[derive(Clone)]
pub struct Deps {
    pub llm: Option<Arc<dyn ChatProvider>>,
    /// Sampling temperature passed through on every planner call.
    pub llm_temperature: Option<f32>,
    /// Token cap passed through on every planner call.
    pub llm_max_tokens: Option<u32>,
    pub places: Option<Arc<dyn PlacesClient>>,
    /// Radius for the plan path's nearby-alternatives search.
    pub nearby_radius_m: u32,
}

impl Deps {
    /// A bundle with no outbound providers at all. The pipeline still
    /// serves fallback recommendations with it.
    pub fn disabled() -> Self {
        Self {
            llm: None,
            llm_temperature: None,
            llm_max_tokens: None,
            places: None,
            nearby_radius_m: 1_500,
        }
    }
}
