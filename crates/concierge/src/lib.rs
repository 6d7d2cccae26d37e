//! The Concierge planning pipeline.
//!
//! Takes a free-text wish plus an optional location and produces a small
//! ranked list of shrine recommendations with short Japanese location
//! labels. Pure library: the HTTP framing lives in the gateway crate, and
//! every outbound dependency (LLM, Places) is injected through [`Deps`].
//!
//! Pipeline order per request: plan ([`planner`]) → complete
//! ([`complete`]) → area seed → backfill ([`backfill`]). Upstream
//! failures downgrade the output; only request validation aborts.

pub mod backfill;
pub mod chat;
pub mod complete;
pub mod deps;
pub mod intent;
pub mod parse;
pub mod plan;
pub mod planner;

pub use chat::handle_chat;
pub use deps::Deps;
pub use plan::handle_plan;
