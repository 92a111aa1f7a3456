//! PostgreSQL-backed `ProjectRepository`.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PersistenceError, ProjectRepository};
use crate::domain::{Project, ProjectId, Slug};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ProjectRow, convert_all};
use super::pool::DbPool;
use super::schema::{projects, statuses};

#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Project>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        projects::table
            .filter(projects::slug.eq(slug.as_ref()))
            .select(ProjectRow::as_select())
            .first::<ProjectRow>(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "find project by slug"))?
            .map(Project::try_from)
            .transpose()
    }

    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        projects::table
            .find(id.get())
            .select(ProjectRow::as_select())
            .first::<ProjectRow>(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "find project by id"))?
            .map(Project::try_from)
            .transpose()
    }

    async fn list_active(&self) -> Result<Vec<Project>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = projects::table
            .filter(exists(
                statuses::table.filter(statuses::project_id.eq(projects::id.nullable())),
            ))
            .order(projects::name.asc())
            .select(ProjectRow::as_select())
            .load::<ProjectRow>(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "list active projects"))?;
        convert_all(rows)
    }

    async fn list_all(&self) -> Result<Vec<Project>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = projects::table
            .order(projects::name.asc())
            .select(ProjectRow::as_select())
            .load::<ProjectRow>(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "list projects"))?;
        convert_all(rows)
    }
}
