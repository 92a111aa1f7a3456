//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; conversions into domain
//! types validate slugs on the way out.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::ports::PersistenceError;
use crate::domain::{Project, ProjectId, Slug, Team, TeamId, User, UserId};

use super::schema::{projects, statuses, teams, users};

fn slug(raw: String, table: &str) -> Result<Slug, PersistenceError> {
    Slug::parse(raw.as_str())
        .map_err(|error| PersistenceError::query(format!("{table} slug {raw:?}: {error}")))
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub slug: String,
    pub email: String,
    pub name: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = PersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User::new(
            UserId::new(row.id),
            row.username,
            slug(row.slug, "users")?,
            row.email,
            row.name,
        ))
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub repo_url: Option<String>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = PersistenceError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Project::new(
            ProjectId::new(row.id),
            row.name,
            slug(row.slug, "projects")?,
            row.repo_url,
        ))
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = teams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TeamRow {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl TryFrom<TeamRow> for Team {
    type Error = PersistenceError;

    fn try_from(row: TeamRow) -> Result<Self, Self::Error> {
        Ok(Team::new(TeamId::new(row.id), row.name, slug(row.slug, "teams")?))
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = statuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StatusRow {
    pub id: i32,
    pub user_id: i32,
    pub project_id: Option<i32>,
    pub content: String,
    pub content_html: String,
    pub created: DateTime<Utc>,
    pub reply_to_id: Option<i32>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = statuses)]
pub(crate) struct NewStatusRow<'a> {
    pub user_id: i32,
    pub project_id: Option<i32>,
    pub content: &'a str,
    pub content_html: &'a str,
    pub created: DateTime<Utc>,
    pub reply_to_id: Option<i32>,
}

/// Convert a batch of rows, failing on the first invalid one.
pub(crate) fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, PersistenceError>
where
    T: TryFrom<R, Error = PersistenceError>,
{
    rows.into_iter().map(T::try_from).collect()
}
