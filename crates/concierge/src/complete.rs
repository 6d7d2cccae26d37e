//! No-network completion of a parsed plan.
//!
//! Fills empty reasons from the intent table and empty locations from
//! same-named caller candidates. Values are adopted raw here; shortening
//! is the backfill step's job.

use tg_domain::concierge::{Candidate, Recommendation};

use crate::intent;
use crate::parse::is_coordinate_like;

/// Enrich `recs` in place from the query and the caller's candidates.
pub fn complete(recs: &mut [Recommendation], query: &str, candidates: &[Candidate]) {
    for rec in recs.iter_mut() {
        if rec.reason.trim().is_empty() {
            rec.reason = intent::reason_or_default(query).to_string();
        }

        if !rec.has_location() {
            if let Some(candidate) = find_by_name(candidates, &rec.name) {
                if let Some(text) = location_text(candidate) {
                    rec.location = Some(text.to_string());
                }
            }
        }
    }
}

/// First candidate whose normalized name equals the recommendation's.
pub(crate) fn find_by_name<'a>(candidates: &'a [Candidate], name: &str) -> Option<&'a Candidate> {
    let wanted = normalize_name(name);
    if wanted.is_empty() {
        return None;
    }
    candidates
        .iter()
        .find(|c| c.name.as_deref().map(normalize_name) == Some(wanted.clone()))
}

/// Trim, lowercase, and strip all (unicode) whitespace.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase().split_whitespace().collect()
}

/// The first usable location-ish field of a candidate, in adoption order.
fn location_text(c: &Candidate) -> Option<&str> {
    let label = c
        .location
        .as_ref()
        .and_then(|l| l.as_label())
        .filter(|s| !is_coordinate_like(s));

    label
        .or_else(|| non_empty(c.address.as_deref()))
        .or_else(|| non_empty(c.formatted_address.as_deref()))
        .or_else(|| non_empty(c.vicinity.as_deref()))
        .or_else(|| non_empty(c.city.as_deref()))
        .or_else(|| non_empty(c.ward.as_deref()))
        .or_else(|| non_empty(c.area.as_deref()))
        .or_else(|| non_empty(c.area_hint.as_deref()))
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|v| !v.is_empty())
}
