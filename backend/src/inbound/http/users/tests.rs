//! Tests for users API handlers.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use super::*;
use crate::domain::ports::{MockAuthenticationService, MockTokenService, MockUsersQuery};
use crate::inbound::http::test_utils::{ANN_ID, ann, mock_state, persisted_user};
use actix_web::http::StatusCode;
use actix_web::{App, HttpMessage, test as actix_test, web};
use rstest::rstest;
use serde_json::Value;

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(web::scope("/api/v1").service(current_user).service(list_users))
}

async fn get_as(state: HttpState, uri: &str, principal: Option<User>) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(state)).await;
    let request = actix_test::TestRequest::get().uri(uri).to_request();
    if let Some(user) = principal {
        request
            .extensions_mut()
            .insert(AuthenticatedUser::new(user));
    }
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&bytes).expect("JSON body");
    (status, value)
}

fn idle_state() -> HttpState {
    mock_state(
        MockAuthenticationService::new(),
        MockTokenService::new(),
        MockUsersQuery::new(),
    )
}

#[rstest]
#[actix_web::test]
async fn current_user_echoes_principal() {
    let (status, body) = get_as(idle_state(), "/api/v1/users/me", Some(ann())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], ANN_ID);
    assert_eq!(body["email"], "ann@example.com");
    assert_eq!(body["createdAt"], "2026-01-02T03:04:05Z");
    assert!(body.get("passwordHash").is_none());
}

#[rstest]
#[actix_web::test]
async fn current_user_without_principal_is_unauthorized() {
    let (status, body) = get_as(idle_state(), "/api/v1/users/me", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["detail"],
        "Full authentication is required to access this resource"
    );
}

#[rstest]
#[actix_web::test]
async fn list_users_maps_every_record() {
    let admin = persisted_user("Root", "root@example.com", Role::Admin);
    let admin_id = admin.id();
    let mut users = MockUsersQuery::new();
    users
        .expect_list_users()
        .withf(move |requested_by| *requested_by == admin_id)
        .return_once(|_| {
            Ok(vec![
                persisted_user("Root", "root@example.com", Role::Admin),
                ann(),
            ])
        });
    let state = mock_state(
        MockAuthenticationService::new(),
        MockTokenService::new(),
        users,
    );

    let (status, body) = get_as(state, "/api/v1/users", Some(admin)).await;

    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().expect("array body");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["role"], "admin");
    assert_eq!(listed[1]["email"], "ann@example.com");
}

#[rstest]
#[actix_web::test]
async fn list_users_surfaces_store_outage() {
    let mut users = MockUsersQuery::new();
    users
        .expect_list_users()
        .return_once(|_| Err(Error::service_unavailable("user store unavailable")));
    let state = mock_state(
        MockAuthenticationService::new(),
        MockTokenService::new(),
        users,
    );

    let (status, body) = get_as(
        state,
        "/api/v1/users",
        Some(persisted_user("Root", "root@example.com", Role::Admin)),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "service_unavailable");
}

#[rstest]
#[actix_web::test]
async fn list_users_rejects_regular_users_without_querying() {
    let mut users = MockUsersQuery::new();
    users.expect_list_users().never();
    let state = mock_state(
        MockAuthenticationService::new(),
        MockTokenService::new(),
        users,
    );

    let (status, body) = get_as(state, "/api/v1/users", Some(ann())).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Access Denied");
    assert_eq!(
        body["description"],
        "You are not authorized to access this resource"
    );
}
