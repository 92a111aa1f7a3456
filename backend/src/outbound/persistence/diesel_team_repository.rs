//! PostgreSQL-backed `TeamRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PersistenceError, TeamRepository};
use crate::domain::{Slug, Team, TeamId, User};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{TeamRow, UserRow, convert_all};
use super::pool::DbPool;
use super::schema::{team_users, teams, users};

#[derive(Clone)]
pub struct DieselTeamRepository {
    pool: DbPool,
}

impl DieselTeamRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for DieselTeamRepository {
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Team>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        teams::table
            .filter(teams::slug.eq(slug.as_ref()))
            .select(TeamRow::as_select())
            .first::<TeamRow>(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "find team by slug"))?
            .map(Team::try_from)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Team>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = teams::table
            .order(teams::name.asc())
            .select(TeamRow::as_select())
            .load::<TeamRow>(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "list teams"))?;
        convert_all(rows)
    }

    async fn members(&self, team: TeamId) -> Result<Vec<User>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = users::table
            .inner_join(team_users::table)
            .filter(team_users::team_id.eq(team.get()))
            .order(users::username.asc())
            .select(UserRow::as_select())
            .load::<UserRow>(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "list team members"))?;
        convert_all(rows)
    }
}
