use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Places provider
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Settings for the third-party Places web service.
///
/// The credential is resolved from the environment variable named in
/// `api_key_env`. When unset the gateway serves without a Places client:
/// the backfill orchestrator simply leaves locations it cannot derive
/// locally unset, and the plan path reports upstream unavailability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    #[serde(default = "d_places_key_env")]
    pub api_key_env: String,
    /// Root of the Places web service, without a trailing slash.
    #[serde(default = "d_places_base_url")]
    pub base_url: String,
    /// Per-call timeout in seconds.
    #[serde(default = "d_8u")]
    pub timeout_secs: u64,
    /// Language tag sent when a request does not carry one.
    #[serde(default = "d_ja")]
    pub language: String,
    /// Radius in meters for the plan path's nearby-alternatives search.
    #[serde(default = "d_1500u")]
    pub nearby_radius_m: u32,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key_env: d_places_key_env(),
            base_url: d_places_base_url(),
            timeout_secs: 8,
            language: "ja".into(),
            nearby_radius_m: 1_500,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_places_key_env() -> String {
    "TG_PLACES_API_KEY".into()
}

fn d_places_base_url() -> String {
    "https://maps.googleapis.com/maps/api/place".into()
}

fn d_8u() -> u64 {
    8
}

fn d_ja() -> String {
    "ja".into()
}

fn d_1500u() -> u32 {
    1_500
}
