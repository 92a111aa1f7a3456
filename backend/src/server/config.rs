//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use standup::inbound::http::session_config::SessionSettings;
use standup::outbound::persistence::DbPool;
use url::Url;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) site_url: Option<Url>,
    pub(crate) per_page: u32,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, per_page: u32) -> Self {
        Self {
            session,
            bind_addr,
            db_pool: None,
            site_url: None,
            per_page,
        }
    }

    /// Attach a database connection pool. Without one the server runs on an
    /// empty in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Fix the site root used in feed links.
    #[must_use]
    pub fn with_site_url(mut self, site_url: Option<Url>) -> Self {
        self.site_url = site_url;
        self
    }
}
