//! Port for project lookups and the project sidebar.
use async_trait::async_trait;

use crate::domain::{Project, ProjectId, Slug};

use super::PersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Project>, PersistenceError>;

    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, PersistenceError>;

    /// Projects with at least one status, ordered by name.
    async fn list_active(&self) -> Result<Vec<Project>, PersistenceError>;

    /// Every project, ordered by name.
    async fn list_all(&self) -> Result<Vec<Project>, PersistenceError>;
}
