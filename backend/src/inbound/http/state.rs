//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` so they depend only on the
//! timeline use-cases and stay testable without I/O.

use pagination::DEFAULT_PER_PAGE;
use url::Url;

use crate::domain::TimelineService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub timeline: TimelineService,
    /// Absolute site root used in feeds. Derived from the request when unset.
    pub site_url: Option<Url>,
    pub per_page: u32,
}

impl HttpState {
    /// State with the default page size and no fixed site root.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use standup::domain::TimelineService;
    /// use standup::inbound::http::state::HttpState;
    /// use standup::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let timeline = TimelineService::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     store.clone(),
    ///     store,
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::new(timeline);
    /// assert_eq!(state.per_page, 20);
    /// ```
    pub fn new(timeline: TimelineService) -> Self {
        Self {
            timeline,
            site_url: None,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn with_site_url(mut self, site_url: Option<Url>) -> Self {
        self.site_url = site_url;
        self
    }

    /// Page size, clamped to at least one.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }
}
