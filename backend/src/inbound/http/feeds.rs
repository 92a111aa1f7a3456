//! Atom feed handlers.
//!
//! ```text
//! GET /statuses.xml  GET /user/{slug}.xml  GET /project/{slug}.xml  GET /team/{slug}.xml
//! ```
//!
//! Links inside a feed are absolute. They resolve against the configured
//! site root, or against the scheme and host the request arrived on.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, web};
use url::Url;

use crate::domain::feed::{ATOM_CONTENT_TYPE, FeedLinks, build_feed};
use crate::domain::{Error, FeedSource};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

fn request_site_url(req: &HttpRequest) -> Result<Url, Error> {
    let info = req.connection_info();
    let raw = format!("{}://{}/", info.scheme(), info.host());
    Url::parse(&raw).map_err(|error| Error::invalid_request(format!("bad host {raw}: {error}")))
}

fn feed_links(state: &HttpState, req: &HttpRequest) -> Result<FeedLinks, Error> {
    let site_url = match &state.site_url {
        Some(url) => url.clone(),
        None => request_site_url(req)?,
    };
    let feed_url = site_url
        .join(req.path().trim_start_matches('/'))
        .map_err(|error| Error::internal(format!("feed url for {}: {error}", req.path())))?;
    FeedLinks::new(feed_url, site_url)
}

fn atom(state: &HttpState, req: &HttpRequest, source: &FeedSource) -> ApiResult<HttpResponse> {
    let links = feed_links(state, req)?;
    let feed = build_feed(
        &source.title,
        &source.statuses,
        &links,
        state.timeline.clock().utc(),
    )?;
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, ATOM_CONTENT_TYPE))
        .body(feed.to_string()))
}

#[get("/statuses.xml")]
pub async fn home_feed(state: web::Data<HttpState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    let source = state.timeline.home_feed().await?;
    atom(&state, &req, &source)
}

#[get("/user/{slug}.xml")]
pub async fn user_feed(
    state: web::Data<HttpState>,
    req: HttpRequest,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let source = state.timeline.user_feed(&slug).await?;
    atom(&state, &req, &source)
}

#[get("/project/{slug}.xml")]
pub async fn project_feed(
    state: web::Data<HttpState>,
    req: HttpRequest,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let source = state.timeline.project_feed(&slug).await?;
    atom(&state, &req, &source)
}

#[get("/team/{slug}.xml")]
pub async fn team_feed(
    state: web::Data<HttpState>,
    req: HttpRequest,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let source = state.timeline.team_feed(&slug).await?;
    atom(&state, &req, &source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    fn links_follow_the_request_host() {
        let req = TestRequest::get()
            .uri("/user/ada.xml")
            .insert_header((header::HOST, "standup.example:8080"))
            .to_http_request();
        let url = request_site_url(&req).expect("site url");
        assert_eq!(url.as_str(), "http://standup.example:8080/");
    }
}
