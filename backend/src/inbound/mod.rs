//! Inbound adapters translating external requests into timeline use-case
//! calls while keeping framework details at the edge.
//!
//! HTML pages and feeds live under [`http`].

pub mod http;
