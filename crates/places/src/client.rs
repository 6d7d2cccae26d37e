//! The seam the Concierge pipeline talks through.

use tg_domain::error::Result;
use tg_domain::place::LatLng;

use crate::types::{FindPlaceResponse, PlaceCandidate, PlaceDetails};

/// Trait over the Places provider.
///
/// The HTTP implementation lives in [`crate::http`]; tests implement this
/// trait directly and never touch the network.
#[async_trait::async_trait]
pub trait PlacesClient: Send + Sync {
    /// One Find-Place-From-Text call.
    async fn find_place(
        &self,
        input: &str,
        language: &str,
        locationbias: Option<&str>,
        fields: &str,
    ) -> Result<FindPlaceResponse>;

    /// One Details call.
    async fn details(&self, place_id: &str, language: &str, fields: &str) -> Result<PlaceDetails>;

    /// One Nearby search around a point.
    async fn nearby(
        &self,
        location: LatLng,
        radius_m: u32,
        keyword: Option<&str>,
        language: &str,
    ) -> Result<Vec<PlaceCandidate>>;
}
