//! The plan-path entry point: resolve a primary place, surround it with up
//! to two alternatives, and emit route hints.

use tg_domain::concierge::{
    ChatData, ConciergeRequest, PlanData, PlanPlace, Recommendation, RouteHints, Waypoint,
};
use tg_domain::error::{Error, Result};
use tg_domain::place::LatLng;
use tg_geo::address::shorten_formatted;
use tg_geo::distance::haversine_m;
use tg_places::{PlaceCandidate, PlacesClient};

use crate::chat::bias_from_request;
use crate::{intent, Deps};

const MAIN_FIELDS: &str =
    "place_id,name,formatted_address,geometry,rating,user_ratings_total,icon";
const NEARBY_KEYWORD: &str = "神社";
const MAX_NEARBY: usize = 2;

/// Run the plan pipeline.
///
/// The primary term must resolve through Places; everything after that is
/// best-effort; a failed nearby search just leaves `nearby` empty.
pub async fn handle_plan(req: &ConciergeRequest, deps: &Deps) -> Result<PlanData> {
    if req.query.trim().is_empty() {
        return Err(Error::Validation("query is required".into()));
    }
    let Some(places) = &deps.places else {
        return Err(Error::places("places client not configured"));
    };

    let bias = bias_from_request(req);
    let primary = primary_term(req);

    let main = resolve_main(places.as_ref(), &primary, &req.language, bias.encode()).await?;

    let nearby = match main.location {
        Some(center) => {
            nearby_alternatives(places.as_ref(), req, deps, center, main.place_id.as_deref())
                .await
        }
        None => Vec::new(),
    };

    let mode = req.transportation.route_mode();
    let route_hints = RouteHints {
        mode,
        waypoints: std::iter::once(&main)
            .chain(nearby.iter())
            .map(|p| Waypoint {
                name: p.name.clone(),
                location: p.location,
            })
            .collect(),
    };

    let data = ChatData {
        recommendations: std::iter::once(&main)
            .chain(nearby.iter())
            .map(|p| place_to_recommendation(p, &req.query))
            .collect(),
    };

    Ok(PlanData {
        mode,
        main,
        nearby,
        route_hints,
        data,
    })
}

/// The term resolved as "main": the first named candidate, else the query.
fn primary_term(req: &ConciergeRequest) -> String {
    req.candidates
        .iter()
        .find_map(|c| c.name.clone().filter(|n| !n.trim().is_empty()))
        .unwrap_or_else(|| req.query.trim().to_string())
}

/// FindPlace on the primary term; Details fills fields FindPlace missed.
async fn resolve_main(
    places: &dyn PlacesClient,
    primary: &str,
    language: &str,
    locationbias: Option<String>,
) -> Result<PlanPlace> {
    let found = places
        .find_place(primary, language, locationbias.as_deref(), MAIN_FIELDS)
        .await?;

    let Some(candidate) = found.first() else {
        // Nothing matched; degrade to a name-only main record.
        tracing::debug!(term = %primary, "no places match for primary term");
        return Ok(PlanPlace {
            name: primary.to_string(),
            ..Default::default()
        });
    };

    let mut main = place_from_candidate(candidate);

    if main.address.is_none() || main.location.is_none() {
        match places.details(&candidate.place_id, language, MAIN_FIELDS).await {
            Ok(details) => {
                main.location = main.location.or(details.location());
                main.address = main.address.or(details.formatted_address);
                main.rating = main.rating.or(details.rating);
                main.user_ratings_total = main.user_ratings_total.or(details.user_ratings_total);
                main.icon = main.icon.or(details.icon);
            }
            Err(e) => {
                tracing::warn!(error = %e, "details lookup for main place failed");
            }
        }
    }

    Ok(main)
}

/// Up to two alternatives around the main location, best rating first,
/// distance as the tie-break. Failures degrade to an empty list.
async fn nearby_alternatives(
    places: &dyn PlacesClient,
    req: &ConciergeRequest,
    deps: &Deps,
    center: LatLng,
    exclude_place_id: Option<&str>,
) -> Vec<PlanPlace> {
    let found = match places
        .nearby(center, deps.nearby_radius_m, Some(NEARBY_KEYWORD), &req.language)
        .await
    {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(error = %e, "nearby search failed");
            return Vec::new();
        }
    };

    let mut alternatives: Vec<PlaceCandidate> = found
        .into_iter()
        .filter(|c| Some(c.place_id.as_str()) != exclude_place_id)
        .collect();

    alternatives.sort_by(|a, b| {
        let rating_order = b
            .rating
            .unwrap_or(0.0)
            .total_cmp(&a.rating.unwrap_or(0.0));
        rating_order.then_with(|| {
            let da = a.location().map(|l| haversine_m(center, l)).unwrap_or(f64::MAX);
            let db = b.location().map(|l| haversine_m(center, l)).unwrap_or(f64::MAX);
            da.total_cmp(&db)
        })
    });

    alternatives
        .iter()
        .take(MAX_NEARBY)
        .map(place_from_candidate)
        .collect()
}

fn place_from_candidate(c: &PlaceCandidate) -> PlanPlace {
    PlanPlace {
        place_id: Some(c.place_id.clone()).filter(|s| !s.is_empty()),
        name: c.name.clone().unwrap_or_default(),
        address: c
            .formatted_address
            .clone()
            .or_else(|| c.vicinity.clone()),
        location: c.location(),
        rating: c.rating,
        user_ratings_total: c.user_ratings_total,
        icon: c.icon.clone(),
    }
}

fn place_to_recommendation(p: &PlanPlace, query: &str) -> Recommendation {
    Recommendation {
        name: p.name.clone(),
        reason: intent::reason_or_default(query).to_string(),
        location: p.address.as_deref().and_then(shorten_formatted),
        ..Default::default()
    }
}
