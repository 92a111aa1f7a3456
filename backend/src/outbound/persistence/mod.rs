//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel rows (`models.rs`,
//! `schema.rs`, both private) and domain types. Connections come from a
//! `bb8` pool through `diesel-async`; failures are mapped onto
//! [`PersistenceError`](crate::domain::ports::PersistenceError).
//!
//! ```ignore
//! use standup::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/standup")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_project_repository;
mod diesel_status_repository;
mod diesel_team_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_status_repository::DieselStatusRepository;
pub use diesel_team_repository::DieselTeamRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
