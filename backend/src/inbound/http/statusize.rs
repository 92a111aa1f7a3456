//! `POST /statusize/`: create a status from the web form.

use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, post, web};
use serde::Deserialize;

use crate::domain::StatusSubmission;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Form fields posted by the profile and status pages.
#[derive(Debug, Default, Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub message: String,
    pub project: Option<String>,
    pub reply_to: Option<String>,
    pub redirect_to: Option<String>,
}

/// `redirect_to` when given, else the `Referer`, else the home page.
///
/// The target is not restricted to this site. Candidates that cannot be sent
/// as a `Location` header are skipped.
fn redirect_target(form_target: Option<&str>, req: &HttpRequest) -> HeaderValue {
    form_target
        .map(str::trim)
        .filter(|target| !target.is_empty())
        .and_then(|target| HeaderValue::from_str(target).ok())
        .or_else(|| {
            req.headers()
                .get(header::REFERER)
                .filter(|referer| !referer.is_empty() && referer.to_str().is_ok())
                .cloned()
        })
        .unwrap_or_else(|| HeaderValue::from_static("/"))
}

#[post("/statusize/")]
pub async fn statusize(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    form: web::Form<StatusForm>,
) -> ApiResult<HttpResponse> {
    let StatusForm {
        message,
        project,
        reply_to,
        redirect_to,
    } = form.into_inner();
    let target = redirect_target(redirect_to.as_deref(), &req);
    state
        .timeline
        .post_status(StatusSubmission {
            email: session.email(),
            message,
            project,
            reply_to,
        })
        .await?;
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, target))
        .finish())
}
