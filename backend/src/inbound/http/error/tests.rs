//! Tests for HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn body_of(error: &Error) -> String {
    let response = ResponseError::error_response(error);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[actix_web::test]
async fn page_shows_the_escaped_message() {
    let body = body_of(&Error::forbidden("You must be logged in to statusize!")).await;
    assert!(body.contains("You must be logged in to statusize!"));

    let body = body_of(&Error::not_found("<script>")).await;
    assert!(body.contains("&lt;script&gt;"));
    assert!(!body.contains("<script>"));
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let body = body_of(&Error::internal("password=hunter2")).await;
    assert!(body.contains(REDACTED_MESSAGE));
    assert!(!body.contains("hunter2"));
}

#[rstest]
fn trace_id_is_echoed_in_a_header() {
    let error = Error::not_found("gone")
        .try_with_trace_id(TRACE_ID)
        .expect("valid trace id");
    let response = ResponseError::error_response(&error);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace id header")
        .to_str()
        .expect("ascii header");
    assert_eq!(header, TRACE_ID);
}

#[rstest]
fn html_content_type() {
    let response = ResponseError::error_response(&Error::not_found("gone"));
    let content_type = response
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    assert_eq!(content_type, Some("text/html; charset=utf-8"));
}
