//! Request/response value types for the Concierge pipeline.
//!
//! Callers send loosely-shaped candidate records (often straight from a
//! prior Places search, sometimes with Japanese field names); everything is
//! normalized into these structs at the HTTP boundary so the pipeline never
//! threads free-form maps around.

use serde::{Deserialize, Serialize};

use crate::place::LatLng;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Body of `POST /api/concierge/chat/` and `POST /api/concierge/plan/`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConciergeRequest {
    /// Free Japanese prose describing the wish (e.g. "縁結び 徒歩").
    #[serde(default)]
    pub query: String,
    /// Caller's current latitude. Only honored together with `lng`.
    #[serde(default)]
    pub lat: Option<f64>,
    /// Caller's current longitude. Only honored together with `lat`.
    #[serde(default)]
    pub lng: Option<f64>,
    /// Bias radius in meters. Highest precedence of the radius fields.
    #[serde(default)]
    pub radius: Option<i64>,
    /// Bias radius in meters.
    #[serde(default)]
    pub radius_m: Option<i64>,
    /// Bias radius in kilometers; used when `radius`/`radius_m` are absent.
    #[serde(default)]
    pub radius_km: Option<f64>,
    /// Pre-encoded `circle:{r}@{lat},{lng}` string; parsed when it is the
    /// only bias source in the request.
    #[serde(default)]
    pub locationbias: Option<String>,
    /// BCP-like language tag passed through to upstream providers.
    #[serde(default = "d_language")]
    pub language: String,
    /// How the user intends to travel; only the plan path uses this.
    #[serde(default)]
    pub transportation: Transportation,
    /// Free Japanese locality description; seeds the first recommendation's
    /// location when the pipeline produced none.
    #[serde(default)]
    pub area: Option<String>,
    /// Prior shrine suggestions from the caller, in preference order.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl Default for ConciergeRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            lat: None,
            lng: None,
            radius: None,
            radius_m: None,
            radius_km: None,
            locationbias: None,
            language: d_language(),
            transportation: Transportation::default(),
            area: None,
            candidates: Vec::new(),
        }
    }
}

fn d_language() -> String {
    "ja".into()
}

/// Caller-facing transportation choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transportation {
    #[default]
    Walk,
    Car,
    Transit,
}

impl Transportation {
    /// Collapse to the internal routing mode: transit is treated as walking
    /// for route hints, car becomes driving.
    pub fn route_mode(self) -> RouteMode {
        match self {
            Transportation::Car => RouteMode::Drive,
            Transportation::Walk | Transportation::Transit => RouteMode::Walk,
        }
    }
}

/// Internal routing mode emitted in plan responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    Walk,
    Drive,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Candidate
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A shrine suggestion contributed by the caller or by an upstream step.
///
/// Deliberately open-shaped: every field is optional and the address-like
/// fields accept the Japanese keys some clients send (`住所`, `場所`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default, alias = "住所")]
    pub address: Option<String>,
    #[serde(default)]
    pub area_hint: Option<String>,
    /// Either an upstream `{lat, lng}` point or an already-short label.
    #[serde(default, alias = "場所")]
    pub location: Option<CandidateLocation>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub ward: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub types: Vec<String>,
}

impl Candidate {
    /// The first address-like field usable for local shortening, in the
    /// order the backfill policy honors them.
    pub fn address_source(&self) -> Option<&str> {
        non_empty(self.formatted_address.as_deref())
            .or_else(|| non_empty(self.address.as_deref()))
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

/// A candidate's `location` field: clients send either a coordinate pair
/// or a short text label, so both shapes deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateLocation {
    Point(LatLng),
    Label(String),
}

impl CandidateLocation {
    /// The label form, if this is one. Coordinates are never surfaced as a
    /// recommendation location.
    pub fn as_label(&self) -> Option<&str> {
        match self {
            CandidateLocation::Label(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<LatLng> {
        match self {
            CandidateLocation::Point(p) => Some(*p),
            CandidateLocation::Label(_) => None,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Recommendation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One element of the final response.
///
/// `formatted_address` and `address` are working fields the backfill policy
/// reads when the LLM echoed an address back; they are never serialized, so
/// a raw multi-line upstream address cannot leak onto the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub reason: String,
    /// Short Japanese label such as "港区赤坂". Absent when no source could
    /// supply one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Ranking score; only the deterministic fallback sets this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing)]
    pub formatted_address: Option<String>,
    #[serde(default, skip_serializing, alias = "住所")]
    pub address: Option<String>,
}

impl Recommendation {
    pub fn has_location(&self) -> bool {
        self.location
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Response payloads
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The `data` block of the chat response envelope.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatData {
    pub recommendations: Vec<Recommendation>,
}

/// A resolved place record in the plan response (`main` and `nearby`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanPlace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LatLng>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Route hints emitted on the plan path.
#[derive(Debug, Clone, Serialize)]
pub struct RouteHints {
    pub mode: RouteMode,
    pub waypoints: Vec<Waypoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Waypoint {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LatLng>,
}

/// Body of the plan response.
#[derive(Debug, Clone, Serialize)]
pub struct PlanData {
    pub mode: RouteMode,
    pub main: PlanPlace,
    pub nearby: Vec<PlanPlace>,
    pub route_hints: RouteHints,
    pub data: ChatData,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_apply() {
        let req: ConciergeRequest = serde_json::from_str(r#"{"query":"縁結び"}"#).unwrap();
        assert_eq!(req.language, "ja");
        assert_eq!(req.transportation, Transportation::Walk);
        assert!(req.candidates.is_empty());
        assert!(req.lat.is_none());
    }

    #[test]
    fn candidate_accepts_japanese_address_key() {
        let c: Candidate =
            serde_json::from_str(r#"{"name":"赤坂氷川神社","住所":"東京都港区赤坂6丁目"}"#)
                .unwrap();
        assert_eq!(c.address.as_deref(), Some("東京都港区赤坂6丁目"));
        assert_eq!(c.address_source(), Some("東京都港区赤坂6丁目"));
    }

    #[test]
    fn candidate_location_accepts_point_and_label() {
        let point: Candidate =
            serde_json::from_str(r#"{"location":{"lat":35.6,"lng":139.7}}"#).unwrap();
        assert!(point.location.unwrap().as_point().is_some());

        let label: Candidate = serde_json::from_str(r#"{"location":"港区赤坂"}"#).unwrap();
        assert_eq!(label.location.unwrap().as_label(), Some("港区赤坂"));
    }

    #[test]
    fn coordinates_are_not_labels() {
        let c: Candidate =
            serde_json::from_str(r#"{"location":{"lat":35.6,"lng":139.7}}"#).unwrap();
        assert!(c.location.unwrap().as_label().is_none());
    }

    #[test]
    fn recommendation_never_serializes_raw_addresses() {
        let rec = Recommendation {
            name: "赤坂氷川神社".into(),
            reason: "縁結び".into(),
            location: Some("港区赤坂".into()),
            score: None,
            formatted_address: Some("日本、〒107-0052 東京都港区赤坂6丁目10−12".into()),
            address: None,
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert!(!json.contains("107-0052"));
        assert!(json.contains("港区赤坂"));
    }

    #[test]
    fn transportation_maps_to_route_mode() {
        assert_eq!(Transportation::Walk.route_mode(), RouteMode::Walk);
        assert_eq!(Transportation::Transit.route_mode(), RouteMode::Walk);
        assert_eq!(Transportation::Car.route_mode(), RouteMode::Drive);
    }
}
