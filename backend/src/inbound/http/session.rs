//! Session access for handlers.
//!
//! The cookie session carries the signed-in user's email address under
//! [`EMAIL_KEY`]. Establishing it is left to whatever fronts the site; this
//! adapter only reads it back.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::Error;

/// Session key holding the signed-in email address.
pub const EMAIL_KEY: &str = "email";

/// Newtype wrapper exposing the session as domain-friendly values.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// The signed-in email address, if any. A value that cannot be decoded
    /// is treated as absent.
    pub fn email(&self) -> Option<String> {
        match self.0.get::<String>(EMAIL_KEY) {
            Ok(email) => email.filter(|email| !email.trim().is_empty()),
            Err(error) => {
                warn!(%error, "unreadable email in session cookie");
                None
            }
        }
    }

    /// Store the signed-in email address.
    pub fn persist_email(&self, email: &str) -> Result<(), Error> {
        self.0
            .insert(EMAIL_KEY, email)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/set",
                web::get().to(|session: SessionContext| async move {
                    session.persist_email("ada@example.com")?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/set-number",
                web::get().to(|session: Session| async move {
                    session.insert(EMAIL_KEY, 42).expect("insert number");
                    HttpResponse::Ok()
                }),
            )
            .route(
                "/get",
                web::get().to(|session: SessionContext| async move {
                    HttpResponse::Ok().body(session.email().unwrap_or_default())
                }),
            )
    }

    async fn email_after(path: &str) -> String {
        let app = test::init_service(session_test_app()).await;
        let set_res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        let body = test::read_body(res).await;
        String::from_utf8(body.to_vec()).expect("utf8 body")
    }

    #[actix_web::test]
    async fn round_trips_email() {
        assert_eq!(email_after("/set").await, "ada@example.com");
    }

    #[actix_web::test]
    async fn non_string_email_is_absent() {
        assert_eq!(email_after("/set-number").await, "");
    }

    #[actix_web::test]
    async fn missing_session_has_no_email() {
        let app = test::init_service(session_test_app()).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/get").to_request()).await;
        assert!(test::read_body(res).await.is_empty());
    }
}
