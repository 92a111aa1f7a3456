//! Standup: team status updates with per-user, per-project and per-team
//! timelines plus Atom feeds.
//!
//! The crate follows a ports-and-adapters layout: `domain` owns entities,
//! formatting and the timeline use-cases; `inbound::http` exposes them over
//! actix-web; `outbound` provides the Diesel and in-memory repositories.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::Trace;
