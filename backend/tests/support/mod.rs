//! Shared harness for the HTTP integration tests.
//!
//! Builds the full application over a seeded in-memory store with the clock
//! frozen at 2024-01-10 12:00 UTC:
//!
//! | id | author | project | created | notes |
//! |---|---|---|---|---|
//! | 1 | ada | Web Dev | 2024-01-10 09:00 | mentions bug 123 and pull 45 |
//! | 2 | bob | - | 2024-01-08 10:00 | |
//! | 3 | bob | - | 2024-01-10 10:00 | reply to 1 |
//! | 4 | cat | - | 2023-12-01 08:00 | |
//!
//! Teams: Platform (ada, bob) and Web (cat). Projects: Web Dev and Kuma
//! (which has no statuses).

use std::sync::Arc;

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};
use chrono::{DateTime, Utc};
use url::Url;

use standup::Trace;
use standup::domain::{Error, NewStatus, Project, ProjectId, Slug, StatusId, TimelineService, User, UserId};
use standup::inbound::http::configure;
use standup::inbound::http::session::SessionContext;
use standup::inbound::http::session_config::SESSION_COOKIE_NAME;
use standup::inbound::http::state::HttpState;
use standup::inbound::http::test_utils::test_session_middleware;
use standup::outbound::memory::InMemoryStore;
use standup::test_support::{FixedClock, team, user, utc};

pub const SITE_URL: &str = "https://standup.example/";

fn slug(raw: &str) -> Slug {
    Slug::parse(raw).expect("fixture slug")
}

fn new_status(
    author: i32,
    project: Option<i32>,
    text: &str,
    created: DateTime<Utc>,
    reply_to: Option<i32>,
) -> NewStatus {
    NewStatus {
        user_id: UserId::new(author),
        project_id: project.map(ProjectId::new),
        content: text.to_owned(),
        content_html: text.to_owned(),
        reply_to: reply_to.map(StatusId::new),
        created,
    }
}

/// The store described in the module docs.
pub fn seeded_store() -> Arc<InMemoryStore> {
    let store = InMemoryStore::new();
    store
        .add_user(User::new(
            UserId::new(1),
            "ada",
            slug("ada"),
            "ada@example.com",
            Some("Ada Lovelace".to_owned()),
        ))
        .expect("seed ada");
    store.add_user(user(2, "bob")).expect("seed bob");
    store.add_user(user(3, "cat")).expect("seed cat");
    store
        .add_project(Project::new(
            ProjectId::new(1),
            "Web Dev",
            slug("webdev"),
            Some("https://github.com/mozilla/standup/".to_owned()),
        ))
        .expect("seed webdev");
    store
        .add_project(Project::new(ProjectId::new(2), "Kuma", slug("kuma"), None))
        .expect("seed kuma");
    let platform = team(1, "Platform", "platform");
    let web = team(2, "Web", "web");
    store.add_team(platform.clone()).expect("seed platform");
    store.add_team(web.clone()).expect("seed web");
    store.add_member(platform.id(), UserId::new(1)).expect("ada joins");
    store.add_member(platform.id(), UserId::new(2)).expect("bob joins");
    store.add_member(web.id(), UserId::new(3)).expect("cat joins");

    let statuses = [
        new_status(1, Some(1), "Fixed bug 123 and pull 45", utc(2024, 1, 10, 9, 0), None),
        new_status(2, None, "Reviewing @ada patches", utc(2024, 1, 8, 10, 0), None),
        new_status(2, None, "nice work", utc(2024, 1, 10, 10, 0), Some(1)),
        new_status(3, None, "old news", utc(2023, 12, 1, 8, 0), None),
    ];
    for status in statuses {
        store.add_status(status).expect("seed status");
    }
    Arc::new(store)
}

/// HTTP state over `store` with the frozen clock and a fixed site root.
pub fn state(store: Arc<InMemoryStore>, per_page: u32) -> HttpState {
    let timeline = TimelineService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store,
        Arc::new(FixedClock::at(2024, 1, 10, 12, 0)),
    );
    HttpState::new(timeline)
        .with_site_url(Some(Url::parse(SITE_URL).expect("site url")))
        .with_per_page(per_page)
}

async fn sign_in_handler(
    session: SessionContext,
    email: web::Path<String>,
) -> Result<HttpResponse, Error> {
    session.persist_email(&email)?;
    Ok(HttpResponse::NoContent().finish())
}

/// The production routes plus `GET /sign-in/{email}`, which stores the
/// email in the session the way an upstream login would.
pub fn app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .wrap(Trace)
        .route("/sign-in/{email}", web::get().to(sign_in_handler))
        .configure(configure)
}

/// Session cookie for `email`.
pub async fn sign_in<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri(&format!("/sign-in/{email}"))
            .to_request(),
    )
    .await;
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .expect("session cookie set")
        .into_owned()
}

/// Response body as text.
pub async fn body_text(res: ServiceResponse) -> String {
    let bytes = test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
