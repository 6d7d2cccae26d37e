//! The chat-path entry point: wish in, `{recommendations: [...]}` out.

use tg_domain::concierge::{Candidate, ChatData, ConciergeRequest, Recommendation};
use tg_domain::error::{Error, Result};
use tg_geo::address::shorten_formatted;
use tg_geo::bias::LocationBias;

use crate::{backfill, complete, planner, Deps};

/// Hard cap on the chat response list.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Name used when not even a candidate is available to seed the minimum.
pub const DEFAULT_NAME: &str = "近隣の神社";

/// Reason attached to the synthesized minimum entry.
pub const MINIMUM_REASON: &str = "暫定";

/// Run the full chat pipeline.
///
/// Succeeds with at least one recommendation for every valid request;
/// upstream failures only degrade the content. The single error case is a
/// missing query.
pub async fn handle_chat(req: &ConciergeRequest, deps: &Deps) -> Result<ChatData> {
    if req.query.trim().is_empty() {
        return Err(Error::Validation("query is required".into()));
    }

    let bias = bias_from_request(req);

    let mut recs = planner::suggest(&req.query, &req.candidates, deps).await;
    recs.truncate(MAX_RECOMMENDATIONS);

    // Guaranteed minimum: a valid request never yields an empty list.
    if recs.is_empty() {
        recs.push(minimum_recommendation(&req.candidates));
    }

    complete::complete(&mut recs, &req.query, &req.candidates);

    // An area string seeds the primary entry's location when nothing else
    // supplied one.
    if let Some(area) = req.area.as_deref().filter(|a| !a.trim().is_empty()) {
        if let Some(first) = recs.first_mut() {
            if !first.has_location() {
                first.location =
                    Some(shorten_formatted(area).unwrap_or_else(|| area.trim().to_string()));
            }
        }
    }

    let filled =
        backfill::fill_locations(recs.clone(), &req.candidates, &bias, deps, true).await;
    // Backfill must never shrink the response to nothing.
    let recommendations = if filled.is_empty() { recs } else { filled };

    Ok(ChatData { recommendations })
}

/// The one entry emitted when the planner produced nothing: first
/// candidate's name, else its place id, else the neutral default.
fn minimum_recommendation(candidates: &[Candidate]) -> Recommendation {
    let name = candidates
        .first()
        .and_then(|c| {
            c.name
                .clone()
                .or_else(|| c.place_id.clone())
                .filter(|n| !n.trim().is_empty())
        })
        .unwrap_or_else(|| DEFAULT_NAME.to_string());

    Recommendation {
        name,
        reason: MINIMUM_REASON.to_string(),
        ..Default::default()
    }
}

/// Build the bias from `lat`/`lng` plus the radius fields, or parse a
/// pre-encoded `locationbias` when that is the only source.
pub(crate) fn bias_from_request(req: &ConciergeRequest) -> LocationBias {
    match (req.lat, req.lng) {
        (Some(lat), Some(lng)) => LocationBias {
            lat: Some(lat),
            lng: Some(lng),
            radius: req.radius,
            radius_m: req.radius_m,
            radius_km: req.radius_km,
        },
        _ => req
            .locationbias
            .as_deref()
            .and_then(LocationBias::parse)
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_prefers_candidate_name() {
        let c = Candidate {
            name: Some("神社A".into()),
            ..Default::default()
        };
        assert_eq!(minimum_recommendation(&[c]).name, "神社A");
    }

    #[test]
    fn minimum_falls_back_to_place_id_then_default() {
        let c = Candidate {
            place_id: Some("pid-1".into()),
            ..Default::default()
        };
        assert_eq!(minimum_recommendation(&[c]).name, "pid-1");
        assert_eq!(minimum_recommendation(&[]).name, DEFAULT_NAME);
    }

    #[test]
    fn bias_prefers_coordinates_over_locationbias_string() {
        let req = ConciergeRequest {
            lat: Some(35.0),
            lng: Some(139.0),
            radius_m: Some(2_000),
            locationbias: Some("circle:9999@1,2".into()),
            ..Default::default()
        };
        assert_eq!(
            bias_from_request(&req).encode().as_deref(),
            Some("circle:2000@35,139")
        );
    }

    #[test]
    fn bias_parses_locationbias_when_only_source() {
        let req = ConciergeRequest {
            locationbias: Some("circle:5000@35.6812,139.7671".into()),
            ..Default::default()
        };
        assert_eq!(
            bias_from_request(&req).encode().as_deref(),
            Some("circle:5000@35.6812,139.7671")
        );
    }

    #[test]
    fn lone_latitude_does_not_bias() {
        let req = ConciergeRequest {
            lat: Some(35.0),
            ..Default::default()
        };
        assert!(bias_from_request(&req).encode().is_none());
    }
}
