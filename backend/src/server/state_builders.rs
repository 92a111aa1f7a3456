//! Builders for the timeline service and HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use standup::domain::TimelineService;
use standup::inbound::http::state::HttpState;
use standup::outbound::memory::InMemoryStore;
use standup::outbound::persistence::{
    DbPool, DieselProjectRepository, DieselStatusRepository, DieselTeamRepository,
    DieselUserRepository,
};

use super::ServerConfig;

/// Timeline backed by PostgreSQL when a pool is available, otherwise by an
/// empty in-memory store.
fn build_timeline(pool: Option<&DbPool>) -> TimelineService {
    let clock = Arc::new(DefaultClock);
    match pool {
        Some(pool) => TimelineService::new(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselProjectRepository::new(pool.clone())),
            Arc::new(DieselTeamRepository::new(pool.clone())),
            Arc::new(DieselStatusRepository::new(pool.clone())),
            clock,
        ),
        None => {
            warn!("no database configured; serving an empty in-memory store");
            let store = Arc::new(InMemoryStore::new());
            TimelineService::new(store.clone(), store.clone(), store.clone(), store, clock)
        }
    }
}

pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = HttpState::new(build_timeline(config.db_pool.as_ref()))
        .with_site_url(config.site_url.clone())
        .with_per_page(config.per_page);
    web::Data::new(state)
}
