//! Projects that statuses may be tagged with.

use crate::domain::{ProjectId, Slug};

/// A project. `repo_url` points at the source repository and lets the
/// update formatter turn `pull 12` into a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: ProjectId,
    name: String,
    slug: Slug,
    repo_url: Option<String>,
}

impl Project {
    pub fn new(id: ProjectId, name: impl Into<String>, slug: Slug, repo_url: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug,
            repo_url,
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Repository URL without a trailing slash, if configured.
    pub fn repo_url(&self) -> Option<&str> {
        self.repo_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }
}
