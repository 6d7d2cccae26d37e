//! The ToriiGuide HTTP gateway.
//!
//! Thin axum surface over the Concierge pipeline: routing, request/response
//! framing, error mapping, CORS, and rate limiting. All planning logic
//! lives in `tg-concierge`.

pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod state;
