//! Port for reading and creating status updates.
//!
//! Listings are described by a [`StatusFilter`]; adapters translate it into
//! their own query language and always return statuses newest first
//! (creation time descending, then id descending).

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::date_range::DateRange;
use crate::domain::{NewStatus, ProjectId, Status, StatusId, TeamId, UserId};

use super::PersistenceError;

/// Which statuses a listing draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusScope {
    /// Every status on the site.
    Everyone,
    /// Statuses authored by one user.
    User(UserId),
    /// Statuses tagged with one project.
    Project(ProjectId),
    /// Statuses authored by any member of a team.
    Team(TeamId),
    /// Exactly one status.
    Single(StatusId),
    /// Replies to one status.
    RepliesTo(StatusId),
}

/// A listing query: scope, reply exclusion and creation-time bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFilter {
    pub scope: StatusScope,
    pub top_level_only: bool,
    pub range: DateRange,
}

impl StatusFilter {
    /// Top-level statuses in `scope` with no date bounds.
    pub const fn top_level(scope: StatusScope) -> Self {
        Self {
            scope,
            top_level_only: true,
            range: DateRange::unbounded(),
        }
    }

    /// Statuses in `scope`, replies included.
    pub const fn including_replies(scope: StatusScope) -> Self {
        Self {
            scope,
            top_level_only: false,
            range: DateRange::unbounded(),
        }
    }

    /// Same filter restricted to `range`.
    pub const fn within(self, range: DateRange) -> Self {
        Self { range, ..self }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// One page of matching statuses plus the total match count.
    async fn page(
        &self,
        filter: &StatusFilter,
        request: PageRequest,
    ) -> Result<Page<Status>, PersistenceError>;

    /// Every matching status, used by the feeds.
    async fn list(&self, filter: &StatusFilter) -> Result<Vec<Status>, PersistenceError>;

    async fn find_by_id(&self, id: StatusId) -> Result<Option<Status>, PersistenceError>;

    /// Store a new status and return its identifier.
    async fn insert(&self, status: NewStatus) -> Result<StatusId, PersistenceError>;
}
