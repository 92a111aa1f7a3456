#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), forbid(clippy::expect_used))]
//! Standup entry-point: loads settings, prepares storage and serves the site.

mod server;

use std::io;

use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use standup::config::AppSettings;
use standup::inbound::http::session_config::{BuildMode, session_settings_from_env};
use standup::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|error| io::Error::other(error.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    info!(fingerprint = %session.fingerprint(), "session signing key loaded");

    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let site_url = settings.site_url().map_err(io::Error::other)?;
    let mut config =
        ServerConfig::new(session, bind_addr, settings.per_page()).with_site_url(site_url);

    if let Some(database_url) = settings.database_url.as_deref() {
        let applied = run_pending_migrations(database_url)
            .await
            .map_err(io::Error::other)?;
        info!(applied, "database migrations complete");
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
        )
        .await
        .map_err(io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    info!(%bind_addr, "starting server");
    create_server(config)?.await
}
