//! Teams group users; a team's timeline is the union of its members'.

use crate::domain::{Slug, TeamId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: TeamId,
    name: String,
    slug: Slug,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>, slug: Slug) -> Self {
        Self {
            id,
            name: name.into(),
            slug,
        }
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }
}
