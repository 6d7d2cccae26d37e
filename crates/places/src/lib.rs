//! Adapter over the third-party Places web service.
//!
//! Exposes the [`PlacesClient`] trait (Find-Place-From-Text, Details,
//! Nearby) with a reqwest-backed HTTP implementation and an injectable
//! request-trace observer for test observability.

pub mod client;
pub mod http;
pub mod trace;
pub mod types;

pub use client::PlacesClient;
pub use http::HttpPlacesClient;
pub use trace::{MemoryTrace, NoopTrace, RequestTrace, TraceEntry};
pub use types::{FindPlaceResponse, Geometry, PhotoRef, PlaceCandidate, PlaceDetails};
