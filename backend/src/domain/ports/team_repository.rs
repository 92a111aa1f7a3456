//! Port for teams and their membership.
use async_trait::async_trait;

use crate::domain::{Slug, Team, TeamId, User};

use super::PersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Team>, PersistenceError>;

    /// Every team, ordered by name.
    async fn list_all(&self) -> Result<Vec<Team>, PersistenceError>;

    /// Members of `team`, ordered by username.
    async fn members(&self, team: TeamId) -> Result<Vec<User>, PersistenceError>;
}
