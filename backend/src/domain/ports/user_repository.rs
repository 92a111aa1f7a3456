//! Port for looking up user accounts.
use async_trait::async_trait;

use crate::domain::{Slug, User};

use super::PersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by public slug.
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<User>, PersistenceError>;

    /// Fetch the account owning `email`, the identity kept in the session.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PersistenceError>;
}
