//! Outbound adapters implementing the domain repository ports.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel.
//! - **memory**: a process-local store used when no database is configured
//!   and in tests.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;
