//! Location backfill.
//!
//! For each recommendation still missing a short location label, find the
//! cheapest source: an address already on the entry, then a same-named
//! candidate's address, and only then a FindPlace + Details round
//! trip. Upstream failures leave the entry without a location; they never
//! fail the request.

use tg_domain::concierge::{Candidate, Recommendation};
use tg_geo::address::{shorten, shorten_formatted, AddressSource};
use tg_geo::bias::LocationBias;
use tg_places::PlacesClient;

use crate::complete::find_by_name;
use crate::deps::Deps;

const FIND_FIELDS: &str = "place_id,name,formatted_address,geometry";
const DETAIL_FIELDS: &str = "formatted_address,address_components";

/// Fill missing locations, preferring zero-network sources.
///
/// Idempotent on its own output: entries that gained a location are kept
/// unchanged on a re-run and cause no further upstream calls.
pub async fn fill_locations(
    mut recs: Vec<Recommendation>,
    candidates: &[Candidate],
    bias: &LocationBias,
    deps: &Deps,
    shorten_labels: bool,
) -> Vec<Recommendation> {
    let locationbias = bias.encode();

    for rec in recs.iter_mut() {
        // 1. An existing location is kept; when shortening is on, a raw
        //    address adopted earlier in the pipeline is normalized here.
        //    Short labels survive the shortener unchanged.
        if let Some(existing) = rec.location.clone().filter(|s| !s.trim().is_empty()) {
            if shorten_labels {
                rec.location = Some(shorten_formatted(&existing).unwrap_or(existing));
            }
            continue;
        }

        // 2. The entry itself carries an address.
        if let Some(addr) = own_address(rec) {
            rec.location = shorten_or_raw(&addr, shorten_labels);
            continue;
        }

        // 3. A same-named caller candidate carries one.
        if let Some(addr) = find_by_name(candidates, &rec.name)
            .and_then(|c| c.address_source())
            .map(String::from)
        {
            rec.location = shorten_or_raw(&addr, shorten_labels);
            continue;
        }

        // 4. Upstream lookup, when possible.
        if rec.name.trim().is_empty() {
            continue;
        }
        let Some(places) = &deps.places else {
            continue;
        };
        match lookup_address(places.as_ref(), &rec.name, locationbias.as_deref()).await {
            Ok(Some(source)) => {
                // A shorten miss leaves the entry bare rather than leaking
                // a long raw address.
                rec.location = shorten(&source);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(name = %rec.name, error = %e, "location lookup failed");
            }
        }
    }

    recs
}

fn own_address(rec: &Recommendation) -> Option<String> {
    rec.formatted_address
        .as_deref()
        .or(rec.address.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn shorten_or_raw(addr: &str, shorten_labels: bool) -> Option<String> {
    if shorten_labels {
        shorten_formatted(addr)
    } else {
        Some(addr.to_string())
    }
}

/// FindPlace by name, then Details for the address fields.
async fn lookup_address(
    places: &dyn PlacesClient,
    name: &str,
    locationbias: Option<&str>,
) -> tg_domain::error::Result<Option<AddressSource>> {
    let found = places
        .find_place(name, "ja", locationbias, FIND_FIELDS)
        .await?;
    let Some(candidate) = found.first() else {
        return Ok(None);
    };

    let details = places
        .details(&candidate.place_id, "ja", DETAIL_FIELDS)
        .await?;

    Ok(Some(AddressSource::Structured {
        components: details.address_components,
        formatted: details.formatted_address,
    }))
}
