//! PostgreSQL-backed `StatusRepository`.
//!
//! Listings are built from one boxed `statuses` query so the count and the
//! page share the same predicates. Authors and projects are then loaded in
//! two batched `IN` queries and stitched onto the rows.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use pagination::{Page, PageRequest};

use crate::domain::ports::{PersistenceError, StatusFilter, StatusRepository, StatusScope};
use crate::domain::{NewStatus, Project, ProjectId, Status, StatusId, User};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewStatusRow, ProjectRow, StatusRow, UserRow};
use super::pool::DbPool;
use super::schema::{projects, statuses, team_users, users};

#[derive(Clone)]
pub struct DieselStatusRepository {
    pool: DbPool,
}

impl DieselStatusRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn filtered(filter: &StatusFilter) -> statuses::BoxedQuery<'static, Pg> {
    let mut query = statuses::table.into_boxed();
    query = match filter.scope {
        StatusScope::Everyone => query,
        StatusScope::User(id) => query.filter(statuses::user_id.eq(id.get())),
        StatusScope::Project(id) => query.filter(statuses::project_id.eq(id.get())),
        StatusScope::Team(id) => query.filter(
            statuses::user_id.eq_any(
                team_users::table
                    .filter(team_users::team_id.eq(id.get()))
                    .select(team_users::user_id),
            ),
        ),
        StatusScope::Single(id) => query.filter(statuses::id.eq(id.get())),
        StatusScope::RepliesTo(id) => query.filter(statuses::reply_to_id.eq(id.get())),
    };
    if filter.top_level_only {
        query = query.filter(statuses::reply_to_id.is_null());
    }
    if let Some(start) = filter.range.start {
        query = query.filter(statuses::created.ge(start));
    }
    if let Some(end) = filter.range.end {
        query = query.filter(statuses::created.le(end));
    }
    query
}

fn newest_first(query: statuses::BoxedQuery<'static, Pg>) -> statuses::BoxedQuery<'static, Pg> {
    query.order((statuses::created.desc(), statuses::id.desc()))
}

/// Attach authors and projects to `rows`, preserving their order.
async fn hydrate(
    conn: &mut AsyncPgConnection,
    rows: Vec<StatusRow>,
) -> Result<Vec<Status>, PersistenceError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let user_ids: BTreeSet<i32> = rows.iter().map(|row| row.user_id).collect();
    let project_ids: BTreeSet<i32> = rows.iter().filter_map(|row| row.project_id).collect();

    let authors = users::table
        .filter(users::id.eq_any(user_ids))
        .select(UserRow::as_select())
        .load::<UserRow>(conn)
        .await
        .map_err(|error| map_diesel_error(error, "load status authors"))?
        .into_iter()
        .map(|row| {
            let id = row.id;
            User::try_from(row).map(|user| (id, user))
        })
        .collect::<Result<HashMap<_, _>, PersistenceError>>()?;

    let projects = if project_ids.is_empty() {
        HashMap::new()
    } else {
        projects::table
            .filter(projects::id.eq_any(project_ids))
            .select(ProjectRow::as_select())
            .load::<ProjectRow>(conn)
            .await
            .map_err(|error| map_diesel_error(error, "load status projects"))?
            .into_iter()
            .map(|row| {
                let id = row.id;
                Project::try_from(row).map(|project| (id, project))
            })
            .collect::<Result<HashMap<_, _>, PersistenceError>>()?
    };

    rows.into_iter()
        .map(|row| {
            let author = authors.get(&row.user_id).cloned().ok_or_else(|| {
                PersistenceError::query(format!(
                    "status {} references missing user {}",
                    row.id, row.user_id
                ))
            })?;
            let project = row.project_id.and_then(|id| projects.get(&id).cloned());
            Ok(Status::new(
                StatusId::new(row.id),
                author,
                project,
                row.content,
                row.content_html,
                row.created,
                row.reply_to_id.map(StatusId::new),
            ))
        })
        .collect()
}

#[async_trait]
impl StatusRepository for DieselStatusRepository {
    async fn page(
        &self,
        filter: &StatusFilter,
        request: PageRequest,
    ) -> Result<Page<Status>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total = filtered(filter)
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "count statuses"))?;
        let total = u64::try_from(total).unwrap_or_default();
        if request.offset() >= total {
            return Ok(Page::new(Vec::new(), total, request));
        }

        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
        let rows = newest_first(filtered(filter))
            .offset(offset)
            .limit(i64::from(request.limit()))
            .select(StatusRow::as_select())
            .load::<StatusRow>(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "load status page"))?;
        let items = hydrate(&mut conn, rows).await?;
        Ok(Page::new(items, total, request))
    }

    async fn list(&self, filter: &StatusFilter) -> Result<Vec<Status>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = newest_first(filtered(filter))
            .select(StatusRow::as_select())
            .load::<StatusRow>(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "list statuses"))?;
        hydrate(&mut conn, rows).await
    }

    async fn find_by_id(&self, id: StatusId) -> Result<Option<Status>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = statuses::table
            .find(id.get())
            .select(StatusRow::as_select())
            .first::<StatusRow>(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "find status"))?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(hydrate(&mut conn, vec![row]).await?.into_iter().next())
    }

    async fn insert(&self, status: NewStatus) -> Result<StatusId, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewStatusRow {
            user_id: status.user_id.get(),
            project_id: status.project_id.map(ProjectId::get),
            content: &status.content,
            content_html: &status.content_html,
            created: status.created,
            reply_to_id: status.reply_to.map(StatusId::get),
        };
        diesel::insert_into(statuses::table)
            .values(&row)
            .returning(statuses::id)
            .get_result::<i32>(&mut conn)
            .await
            .map(StatusId::new)
            .map_err(|error| map_diesel_error(error, "insert status"))
    }
}
