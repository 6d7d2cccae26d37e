//! HTTP implementation of [`PlacesClient`] against a Google-style Places
//! web service. Auth is an API key sent as the `key` query parameter.

use std::sync::Arc;

use serde_json::Value;

use tg_domain::config::PlacesConfig;
use tg_domain::error::{Error, Result};
use tg_domain::place::LatLng;

use crate::client::PlacesClient;
use crate::trace::RequestTrace;
use crate::types::{check_status, FindPlaceResponse, PlaceCandidate, PlaceDetails};

/// Placeholder recorded in the trace instead of the real key.
const REDACTED_KEY: &str = "****";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct HttpPlacesClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
    trace: Arc<dyn RequestTrace>,
}

impl HttpPlacesClient {
    /// Build a client from config, resolving the API key from the
    /// environment variable the config names.
    pub fn from_config(cfg: &PlacesConfig, trace: Arc<dyn RequestTrace>) -> Result<Self> {
        let api_key = std::env::var(&cfg.api_key_env)
            .map_err(|_| Error::Auth(format!("env var '{}' not set", cfg.api_key_env)))?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(from_reqwest)?;

        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
            trace,
        })
    }

    fn url(&self, op: &str) -> String {
        format!("{}/{op}/json", self.base_url)
    }

    /// Perform one GET, record the (redacted) call in the trace, check the
    /// provider status, and return the parsed body.
    async fn get_checked(&self, url: &str, params: Vec<(String, String)>) -> Result<Value> {
        self.trace.record(url, &redact_key(&params));
        tracing::debug!(url = %url, "places request");

        let real_params = with_real_key(params, &self.api_key);
        let resp = self
            .client
            .get(url)
            .query(&real_params)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let text = resp.text().await.map_err(from_reqwest)?;
        if !status.is_success() {
            return Err(Error::places(format!("HTTP {}", status.as_u16())));
        }

        let body: Value = serde_json::from_str(&text)?;
        check_status(&body)?;
        Ok(body)
    }
}

#[async_trait::async_trait]
impl PlacesClient for HttpPlacesClient {
    async fn find_place(
        &self,
        input: &str,
        language: &str,
        locationbias: Option<&str>,
        fields: &str,
    ) -> Result<FindPlaceResponse> {
        let url = self.url("findplacefromtext");
        let params = find_place_params(input, language, locationbias, fields);
        let body = self.get_checked(&url, params).await?;
        FindPlaceResponse::from_body(&body)
    }

    async fn details(&self, place_id: &str, language: &str, fields: &str) -> Result<PlaceDetails> {
        let url = self.url("details");
        let params = details_params(place_id, language, fields);
        let body = self.get_checked(&url, params).await?;
        PlaceDetails::from_body(&body)
    }

    async fn nearby(
        &self,
        location: LatLng,
        radius_m: u32,
        keyword: Option<&str>,
        language: &str,
    ) -> Result<Vec<PlaceCandidate>> {
        let url = self.url("nearbysearch");
        let params = nearby_params(location, radius_m, keyword, language);

        // INVALID_REQUEST from nearby is sometimes transient; retry once.
        let body = match self.get_checked(&url, params.clone()).await {
            Ok(body) => body,
            Err(e) if is_invalid_request(&e) => {
                tracing::debug!("nearby returned INVALID_REQUEST, retrying once");
                tokio::time::sleep(std::time::Duration::from_millis(300)).await;
                self.get_checked(&url, params).await?
            }
            Err(e) => return Err(e),
        };

        Ok(FindPlaceResponse::from_body(&body)?.candidates)
    }
}

fn is_invalid_request(e: &Error) -> bool {
    matches!(e, Error::Upstream { message, .. } if message.contains("INVALID_REQUEST"))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Parameter builders
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// All builders emit the key slot as `"****"`; the real key is substituted
/// just before the request so it can never reach a log or the trace.
fn base_params() -> Vec<(String, String)> {
    vec![("key".into(), REDACTED_KEY.into())]
}

fn find_place_params(
    input: &str,
    language: &str,
    locationbias: Option<&str>,
    fields: &str,
) -> Vec<(String, String)> {
    let mut params = base_params();
    params.push(("input".into(), input.into()));
    params.push(("inputtype".into(), "textquery".into()));
    params.push(("language".into(), language.into()));
    params.push(("fields".into(), fields.into()));
    if let Some(bias) = locationbias {
        params.push(("locationbias".into(), bias.into()));
    }
    params
}

fn details_params(place_id: &str, language: &str, fields: &str) -> Vec<(String, String)> {
    let mut params = base_params();
    params.push(("place_id".into(), place_id.into()));
    params.push(("language".into(), language.into()));
    params.push(("fields".into(), fields.into()));
    params
}

fn nearby_params(
    location: LatLng,
    radius_m: u32,
    keyword: Option<&str>,
    language: &str,
) -> Vec<(String, String)> {
    let mut params = base_params();
    params.push((
        "location".into(),
        format!("{},{}", location.lat, location.lng),
    ));
    params.push(("radius".into(), radius_m.to_string()));
    if let Some(kw) = keyword {
        params.push(("keyword".into(), kw.into()));
    }
    params.push(("language".into(), language.into()));
    params
}

fn redact_key(params: &[(String, String)]) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(k, v)| {
            if k == "key" {
                (k.clone(), REDACTED_KEY.to_string())
            } else {
                (k.clone(), v.clone())
            }
        })
        .collect()
}

fn with_real_key(mut params: Vec<(String, String)>, key: &str) -> Vec<(String, String)> {
    for (k, v) in params.iter_mut() {
        if k == "key" {
            *v = key.to_string();
        }
    }
    params
}

fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn find_place_params_shape() {
        let params = find_place_params(
            "赤坂氷川神社",
            "ja",
            Some("circle:5000@35.6812,139.7671"),
            "place_id,name,formatted_address,geometry",
        );
        assert_eq!(get(&params, "inputtype"), Some("textquery"));
        assert_eq!(get(&params, "input"), Some("赤坂氷川神社"));
        assert_eq!(
            get(&params, "locationbias"),
            Some("circle:5000@35.6812,139.7671")
        );
    }

    #[test]
    fn find_place_omits_absent_bias() {
        let params = find_place_params("神社", "ja", None, "place_id");
        assert!(get(&params, "locationbias").is_none());
    }

    #[test]
    fn key_is_redacted_in_trace_params() {
        let params = with_real_key(details_params("pid", "ja", "formatted_address"), "sekrit");
        assert_eq!(get(&params, "key"), Some("sekrit"));

        let redacted = redact_key(&params);
        assert_eq!(get(&redacted, "key"), Some("****"));
        // Redaction copies, it does not mutate.
        assert_eq!(get(&params, "key"), Some("sekrit"));
    }

    #[test]
    fn nearby_params_format_location() {
        let params = nearby_params(
            LatLng {
                lat: 35.6812,
                lng: 139.7671,
            },
            1_500,
            Some("神社"),
            "ja",
        );
        assert_eq!(get(&params, "location"), Some("35.6812,139.7671"));
        assert_eq!(get(&params, "radius"), Some("1500"));
        assert_eq!(get(&params, "keyword"), Some("神社"));
    }

    #[test]
    fn invalid_request_is_detected_for_retry() {
        let e = Error::places("status INVALID_REQUEST: ");
        assert!(is_invalid_request(&e));
        let e = Error::places("status REQUEST_DENIED: bad key");
        assert!(!is_invalid_request(&e));
    }
}
