//! Tests for the failure responders.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use super::*;
use actix_web::body::to_bytes;
use actix_web::http::header::CONTENT_TYPE;
use rstest::rstest;
use rstest_bdd_macros::{given, then, when};

async fn read_problem(response: HttpResponse) -> ProblemDetail {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("problem JSON deserialisation succeeds")
}

#[given("an authentication failure with message M")]
fn authentication_failure() -> &'static str {
    "Bad credentials"
}

#[when("the entry point responds")]
fn entry_point_responds(message: &'static str) -> HttpResponse {
    AuthenticationEntryPoint
        .commence(message)
        .expect("response is written")
}

#[then("the response is a 401 JSON problem")]
fn is_unauthorized_json(response: &HttpResponse) {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .expect("content type set")
        .to_str()
        .expect("ascii header");
    assert_eq!(content_type, "application/json");
}

#[rstest]
#[actix_web::test]
async fn entry_point_writes_unauthorized_problem() {
    let message = authentication_failure();
    let response = entry_point_responds(message);
    is_unauthorized_json(&response);

    let problem = read_problem(response).await;
    assert_eq!(problem.status, 401);
    assert_eq!(problem.title, "Unauthorized");
    assert_eq!(problem.detail, "Bad credentials");
    assert_eq!(problem.description, "Invalid or missing token");
    assert_eq!(problem.problem_type, "about:blank");
    assert!(problem.trace_id.is_none());
}

#[rstest]
#[case("Access Denied")]
#[case("")]
#[actix_web::test]
async fn access_denied_writes_forbidden_problem(#[case] message: &str) {
    let response = AccessDeniedHandler
        .handle(message)
        .expect("response is written");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let problem = read_problem(response).await;
    assert_eq!(problem.status, 403);
    assert_eq!(problem.title, "Forbidden");
    assert_eq!(problem.detail, message);
    assert_eq!(
        problem.description,
        "You are not authorized to access this resource"
    );
}

#[rstest]
#[actix_web::test]
async fn trace_id_in_scope_is_stamped_on_body_and_header() {
    let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
        .parse()
        .expect("valid UUID");
    let response = TraceId::scope(trace_id, async {
        AuthenticationEntryPoint.commence(FULL_AUTHENTICATION_REQUIRED)
    })
    .await
    .expect("response is written");

    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace id header")
        .to_str()
        .expect("ascii header")
        .to_owned();
    let problem = read_problem(response).await;
    assert_eq!(problem.trace_id.as_deref(), Some(header.as_str()));
    assert_eq!(header, "00000000-0000-0000-0000-000000000000");
}

#[rstest]
#[actix_web::test]
async fn explicit_trace_id_overrides_scope() {
    let response = AccessDeniedHandler
        .handle_traced(ACCESS_DENIED, Some("captured-earlier"))
        .expect("response is written");
    let problem = read_problem(response).await;
    assert_eq!(problem.trace_id.as_deref(), Some("captured-earlier"));
}

#[rstest]
fn problem_serialises_type_key() {
    let problem = ProblemDetail::new(StatusCode::FORBIDDEN, ACCESS_DENIED, "d");
    let value = serde_json::to_value(problem).expect("serialise problem");
    assert_eq!(value["type"], "about:blank");
    assert!(value.get("traceId").is_none());
}
