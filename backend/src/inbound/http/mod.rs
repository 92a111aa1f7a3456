//! HTTP inbound adapter serving the HTML pages and Atom feeds.

pub mod error;
pub mod feeds;
pub mod pages;
pub mod query;
pub mod session;
pub mod session_config;
pub mod state;
pub mod statusize;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod views;

use actix_web::web;

pub use error::ApiResult;

/// Register every route.
///
/// Feed routes come first so `/user/ada.xml` is not taken for a user page.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use standup::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(feeds::home_feed)
        .service(feeds::user_feed)
        .service(feeds::project_feed)
        .service(feeds::team_feed)
        .service(pages::home)
        .service(pages::user)
        .service(pages::project)
        .service(pages::team)
        .service(pages::status)
        .service(pages::profile)
        .service(statusize::statusize);
}
