//! HTML page handlers.
//!
//! ```text
//! GET /                  GET /user/{slug}     GET /project/{slug}
//! GET /team/{slug}       GET /status/{id}     GET /profile/
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::query::ListingQuery;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views;

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// Top-level statuses from everyone.
#[get("/")]
pub async fn home(
    state: web::Data<HttpState>,
    query: web::Query<ListingQuery>,
) -> ApiResult<HttpResponse> {
    let listing = query.listing(state.per_page, state.timeline.clock());
    let statuses = state.timeline.home(listing).await?;
    Ok(html(views::home(&statuses, &query.date_query())))
}

#[get("/user/{slug}")]
pub async fn user(
    state: web::Data<HttpState>,
    slug: web::Path<String>,
    query: web::Query<ListingQuery>,
) -> ApiResult<HttpResponse> {
    let listing = query.listing(state.per_page, state.timeline.clock());
    let timeline = state.timeline.user_timeline(&slug, listing).await?;
    Ok(html(views::user(&timeline, &query.date_query())))
}

#[get("/project/{slug}")]
pub async fn project(
    state: web::Data<HttpState>,
    slug: web::Path<String>,
    query: web::Query<ListingQuery>,
) -> ApiResult<HttpResponse> {
    let listing = query.listing(state.per_page, state.timeline.clock());
    let timeline = state.timeline.project_timeline(&slug, listing).await?;
    Ok(html(views::project(&timeline, &query.date_query())))
}

#[get("/team/{slug}")]
pub async fn team(
    state: web::Data<HttpState>,
    slug: web::Path<String>,
    query: web::Query<ListingQuery>,
) -> ApiResult<HttpResponse> {
    let listing = query.listing(state.per_page, state.timeline.clock());
    let timeline = state.timeline.team_timeline(&slug, listing).await?;
    Ok(html(views::team(&timeline, &query.date_query())))
}

/// One status and a page of its replies. Date filters do not apply.
#[get("/status/{id}")]
pub async fn status(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    query: web::Query<ListingQuery>,
) -> ApiResult<HttpResponse> {
    let thread = state
        .timeline
        .status_thread(&id, query.page_request(state.per_page))
        .await?;
    Ok(html(views::status(&thread)))
}

/// The signed-in user's own statuses with the post form.
#[get("/profile/")]
pub async fn profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ListingQuery>,
) -> ApiResult<HttpResponse> {
    let email = session.email();
    let profile = state
        .timeline
        .profile(email.as_deref(), query.page_request(state.per_page))
        .await?;
    Ok(html(views::profile(&profile)))
}
