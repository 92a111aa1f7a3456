//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod persistence_error;
mod project_repository;
mod status_repository;
mod team_repository;
mod user_repository;

pub use persistence_error::PersistenceError;
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::ProjectRepository;
#[cfg(test)]
pub use status_repository::MockStatusRepository;
pub use status_repository::{StatusFilter, StatusRepository, StatusScope};
#[cfg(test)]
pub use team_repository::MockTeamRepository;
pub use team_repository::TeamRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
