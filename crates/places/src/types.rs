//! Canonical result shapes for the Places provider.
//!
//! Upstream payloads are loosely shaped; these structs keep every field the
//! Concierge pipeline touches optional and drop the rest at the boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use tg_domain::error::{Error, Result};
use tg_domain::place::{AddressComponent, LatLng};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoRef {
    #[serde(default)]
    pub photo_reference: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// One candidate from a Find-Place or Nearby call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceCandidate {
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    /// Nearby results carry `vicinity` instead of a formatted address.
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
}

impl PlaceCandidate {
    pub fn location(&self) -> Option<LatLng> {
        self.geometry.as_ref().and_then(|g| g.location)
    }
}

/// Response of a Find-Place-From-Text call. Upstream names the list
/// `candidates`; some deployments return `results`. Both are accepted.
#[derive(Debug, Clone, Default)]
pub struct FindPlaceResponse {
    pub candidates: Vec<PlaceCandidate>,
}

impl FindPlaceResponse {
    pub fn from_body(body: &Value) -> Result<Self> {
        let list = body
            .get("candidates")
            .or_else(|| body.get("results"))
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        let candidates = list
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect();

        Ok(Self { candidates })
    }

    pub fn first(&self) -> Option<&PlaceCandidate> {
        self.candidates.first()
    }
}

/// Result of a Details call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

impl PlaceDetails {
    /// Accept both the `{"result": {...}}` envelope and a bare top-level
    /// object.
    pub fn from_body(body: &Value) -> Result<Self> {
        let inner = body.get("result").unwrap_or(body);
        serde_json::from_value(inner.clone()).map_err(|e| Error::places(e.to_string()))
    }

    pub fn location(&self) -> Option<LatLng> {
        self.geometry.as_ref().and_then(|g| g.location)
    }
}

/// Reject provider statuses other than OK / ZERO_RESULTS.
pub fn check_status(body: &Value) -> Result<()> {
    let status = body.get("status").and_then(|s| s.as_str()).unwrap_or("");
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => {
            let detail = body
                .get("error_message")
                .and_then(|m| m.as_str())
                .unwrap_or("");
            Err(Error::places(format!("status {other}: {detail}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn find_place_parses_candidates_list() {
        let body = json!({
            "status": "OK",
            "candidates": [{
                "place_id": "pid-1",
                "name": "赤坂氷川神社",
                "formatted_address": "日本、〒107-0052 東京都港区赤坂6丁目10−12",
                "geometry": {"location": {"lat": 35.6707, "lng": 139.7364}},
                "rating": 4.4,
                "user_ratings_total": 1200
            }]
        });
        let resp = FindPlaceResponse::from_body(&body).unwrap();
        assert_eq!(resp.candidates.len(), 1);
        let c = resp.first().unwrap();
        assert_eq!(c.place_id, "pid-1");
        assert_eq!(c.location().unwrap().lat, 35.6707);
    }

    #[test]
    fn find_place_accepts_results_key() {
        let body = json!({"status": "OK", "results": [{"place_id": "pid-2"}]});
        let resp = FindPlaceResponse::from_body(&body).unwrap();
        assert_eq!(resp.first().unwrap().place_id, "pid-2");
    }

    #[test]
    fn find_place_zero_results_is_empty() {
        let body = json!({"status": "ZERO_RESULTS", "candidates": []});
        assert!(check_status(&body).is_ok());
        let resp = FindPlaceResponse::from_body(&body).unwrap();
        assert!(resp.candidates.is_empty());
    }

    #[test]
    fn details_accepts_result_envelope() {
        let body = json!({
            "status": "OK",
            "result": {
                "formatted_address": "東京都港区赤坂6丁目10−12",
                "address_components": [
                    {"long_name": "赤坂", "short_name": "赤坂", "types": ["sublocality_level_1"]},
                    {"long_name": "港区", "short_name": "港区", "types": ["locality"]}
                ]
            }
        });
        let details = PlaceDetails::from_body(&body).unwrap();
        assert_eq!(details.address_components.len(), 2);
        assert_eq!(
            details.formatted_address.as_deref(),
            Some("東京都港区赤坂6丁目10−12")
        );
    }

    #[test]
    fn details_accepts_bare_object() {
        let body = json!({"formatted_address": "東京都渋谷区神南1-1-1"});
        let details = PlaceDetails::from_body(&body).unwrap();
        assert_eq!(
            details.formatted_address.as_deref(),
            Some("東京都渋谷区神南1-1-1")
        );
    }

    #[test]
    fn bad_status_maps_to_upstream_error() {
        let body = json!({"status": "REQUEST_DENIED", "error_message": "key invalid"});
        let err = check_status(&body).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("places"), "got {msg}");
        assert!(msg.contains("REQUEST_DENIED"), "got {msg}");
    }
}
