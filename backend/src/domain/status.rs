//! Status updates and the shape used to create them.

use chrono::{DateTime, Utc};

use crate::domain::{Project, ProjectId, StatusId, User, UserId};

/// A posted update, hydrated with its author and optional project.
///
/// ## Invariants
/// - A status with `reply_to` set is a reply and never appears in top-level
///   listings or feeds.
/// - `content_html` is the markdown source the site renders. It is never
///   trusted as HTML; see [`crate::domain::formatting::status_body`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    id: StatusId,
    author: User,
    project: Option<Project>,
    content: String,
    content_html: String,
    created: DateTime<Utc>,
    reply_to: Option<StatusId>,
}

impl Status {
    pub fn new(
        id: StatusId,
        author: User,
        project: Option<Project>,
        content: impl Into<String>,
        content_html: impl Into<String>,
        created: DateTime<Utc>,
        reply_to: Option<StatusId>,
    ) -> Self {
        Self {
            id,
            author,
            project,
            content: content.into(),
            content_html: content_html.into(),
            created,
            reply_to,
        }
    }

    pub fn id(&self) -> StatusId {
        self.id
    }

    pub fn author(&self) -> &User {
        &self.author
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn content_html(&self) -> &str {
        &self.content_html
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn reply_to(&self) -> Option<StatusId> {
        self.reply_to
    }

    /// Whether this status is a top-level update rather than a reply.
    pub fn is_top_level(&self) -> bool {
        self.reply_to.is_none()
    }
}

/// Fields required to insert a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStatus {
    pub user_id: UserId,
    pub project_id: Option<ProjectId>,
    pub content: String,
    pub content_html: String,
    pub reply_to: Option<StatusId>,
    pub created: DateTime<Utc>,
}
