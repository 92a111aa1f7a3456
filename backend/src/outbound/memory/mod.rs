//! In-memory implementation of every repository port.
//!
//! Used when no database URL is configured and by the HTTP tests. A single
//! mutex guards the whole store; a poisoned lock surfaces as
//! [`PersistenceError::Query`].

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    PersistenceError, ProjectRepository, StatusFilter, StatusRepository, StatusScope,
    TeamRepository, UserRepository,
};
use crate::domain::{
    NewStatus, Project, ProjectId, Slug, Status, StatusId, Team, TeamId, User, UserId,
};

#[derive(Debug, Clone)]
struct StoredStatus {
    id: StatusId,
    user_id: UserId,
    project_id: Option<ProjectId>,
    content: String,
    content_html: String,
    created: DateTime<Utc>,
    reply_to: Option<StatusId>,
}

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    projects: Vec<Project>,
    teams: Vec<Team>,
    memberships: Vec<(TeamId, UserId)>,
    statuses: Vec<StoredStatus>,
    last_status_id: i32,
}

impl State {
    fn matches(&self, filter: &StatusFilter, status: &StoredStatus) -> bool {
        let in_scope = match filter.scope {
            StatusScope::Everyone => true,
            StatusScope::User(id) => status.user_id == id,
            StatusScope::Project(id) => status.project_id == Some(id),
            StatusScope::Team(id) => self.memberships.contains(&(id, status.user_id)),
            StatusScope::Single(id) => status.id == id,
            StatusScope::RepliesTo(id) => status.reply_to == Some(id),
        };
        in_scope
            && (!filter.top_level_only || status.reply_to.is_none())
            && filter.range.contains(status.created)
    }

    /// Matching statuses, newest first.
    fn select(&self, filter: &StatusFilter) -> Vec<&StoredStatus> {
        let mut selected: Vec<_> = self
            .statuses
            .iter()
            .filter(|status| self.matches(filter, status))
            .collect();
        selected.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        selected
    }

    fn hydrate(&self, stored: &StoredStatus) -> Result<Status, PersistenceError> {
        let author = self
            .users
            .iter()
            .find(|user| user.id() == stored.user_id)
            .cloned()
            .ok_or_else(|| {
                PersistenceError::query(format!(
                    "status {} references missing user {}",
                    stored.id, stored.user_id
                ))
            })?;
        let project = stored.project_id.and_then(|id| {
            self.projects
                .iter()
                .find(|project| project.id() == id)
                .cloned()
        });
        Ok(Status::new(
            stored.id,
            author,
            project,
            stored.content.clone(),
            stored.content_html.clone(),
            stored.created,
            stored.reply_to,
        ))
    }

    fn hydrate_all<'a>(
        &self,
        stored: impl IntoIterator<Item = &'a StoredStatus>,
    ) -> Result<Vec<Status>, PersistenceError> {
        stored.into_iter().map(|status| self.hydrate(status)).collect()
    }
}

fn sorted_by_name<T: Clone>(items: impl Iterator<Item = T>, name: impl Fn(&T) -> &str) -> Vec<T> {
    let mut items: Vec<T> = items.collect();
    items.sort_by(|a, b| name(a).cmp(name(b)));
    items
}

/// Process-local store implementing the user, project, team and status
/// ports.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, PersistenceError> {
        self.state
            .lock()
            .map_err(|_| PersistenceError::query("in-memory store lock poisoned"))
    }

    pub fn add_user(&self, user: User) -> Result<(), PersistenceError> {
        self.lock()?.users.push(user);
        Ok(())
    }

    pub fn add_project(&self, project: Project) -> Result<(), PersistenceError> {
        self.lock()?.projects.push(project);
        Ok(())
    }

    pub fn add_team(&self, team: Team) -> Result<(), PersistenceError> {
        self.lock()?.teams.push(team);
        Ok(())
    }

    pub fn add_member(&self, team: TeamId, user: UserId) -> Result<(), PersistenceError> {
        let mut state = self.lock()?;
        if !state.memberships.contains(&(team, user)) {
            state.memberships.push((team, user));
        }
        Ok(())
    }

    /// Insert a status synchronously; used for seeding.
    pub fn add_status(&self, status: NewStatus) -> Result<StatusId, PersistenceError> {
        let mut state = self.lock()?;
        if !state.users.iter().any(|user| user.id() == status.user_id) {
            return Err(PersistenceError::query(format!(
                "unknown user {}",
                status.user_id
            )));
        }
        state.last_status_id += 1;
        let id = StatusId::new(state.last_status_id);
        state.statuses.push(StoredStatus {
            id,
            user_id: status.user_id,
            project_id: status.project_id,
            content: status.content,
            content_html: status.content_html,
            created: status.created,
            reply_to: status.reply_to,
        });
        Ok(id)
    }

    /// Number of stored statuses, replies included.
    pub fn status_count(&self) -> Result<usize, PersistenceError> {
        Ok(self.lock()?.statuses.len())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<User>, PersistenceError> {
        Ok(self
            .lock()?
            .users
            .iter()
            .find(|user| user.slug() == slug)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PersistenceError> {
        Ok(self
            .lock()?
            .users
            .iter()
            .find(|user| user.email() == email)
            .cloned())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Project>, PersistenceError> {
        Ok(self
            .lock()?
            .projects
            .iter()
            .find(|project| project.slug() == slug)
            .cloned())
    }

    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, PersistenceError> {
        Ok(self
            .lock()?
            .projects
            .iter()
            .find(|project| project.id() == id)
            .cloned())
    }

    async fn list_active(&self) -> Result<Vec<Project>, PersistenceError> {
        let state = self.lock()?;
        let active = state.projects.iter().filter(|project| {
            state
                .statuses
                .iter()
                .any(|status| status.project_id == Some(project.id()))
        });
        Ok(sorted_by_name(active.cloned(), Project::name))
    }

    async fn list_all(&self) -> Result<Vec<Project>, PersistenceError> {
        let state = self.lock()?;
        Ok(sorted_by_name(state.projects.iter().cloned(), Project::name))
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Team>, PersistenceError> {
        Ok(self
            .lock()?
            .teams
            .iter()
            .find(|team| team.slug() == slug)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Team>, PersistenceError> {
        let state = self.lock()?;
        Ok(sorted_by_name(state.teams.iter().cloned(), Team::name))
    }

    async fn members(&self, team: TeamId) -> Result<Vec<User>, PersistenceError> {
        let state = self.lock()?;
        let members = state
            .users
            .iter()
            .filter(|user| state.memberships.contains(&(team, user.id())));
        Ok(sorted_by_name(members.cloned(), User::username))
    }
}

#[async_trait]
impl StatusRepository for InMemoryStore {
    async fn page(
        &self,
        filter: &StatusFilter,
        request: PageRequest,
    ) -> Result<Page<Status>, PersistenceError> {
        let state = self.lock()?;
        let selected = state.select(filter);
        let total = selected.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let window = selected
            .into_iter()
            .skip(offset)
            .take(request.limit() as usize);
        Ok(Page::new(state.hydrate_all(window)?, total, request))
    }

    async fn list(&self, filter: &StatusFilter) -> Result<Vec<Status>, PersistenceError> {
        let state = self.lock()?;
        state.hydrate_all(state.select(filter))
    }

    async fn find_by_id(&self, id: StatusId) -> Result<Option<Status>, PersistenceError> {
        let state = self.lock()?;
        state
            .statuses
            .iter()
            .find(|status| status.id == id)
            .map(|status| state.hydrate(status))
            .transpose()
    }

    async fn insert(&self, status: NewStatus) -> Result<StatusId, PersistenceError> {
        self.add_status(status)
    }
}

#[cfg(test)]
mod tests;
