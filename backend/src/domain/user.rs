//! User accounts as seen by the timelines.

use crate::domain::{Slug, UserId};

/// A registered user.
///
/// The email address is the identity carried by the session; the slug is
/// the public handle used in URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    slug: Slug,
    email: String,
    name: Option<String>,
}

impl User {
    /// Assemble a user from persisted fields.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        slug: Slug,
        email: impl Into<String>,
        name: Option<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            slug,
            email: email.into(),
            name,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name shown as the author of updates: the full name when set,
    /// otherwise the username.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}
