//! Tests for the bearer token endpoints.

use super::*;
use crate::domain::ports::{DEFAULT_PASSWORD, DEFAULT_USERNAME};
use crate::inbound::http::test_utils::{CLOCK_START, TestContext};
use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

async fn login_pair<S>(app: &S) -> TokenResponse
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"username": DEFAULT_USERNAME, "password": DEFAULT_PASSWORD}))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    actix_test::read_body_json(response).await
}

fn post_json(uri: &str, body: Value) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request()
}

#[actix_web::test]
async fn login_returns_a_bearer_pair() {
    let ctx = TestContext::sample();
    let app = actix_test::init_service(ctx.app()).await;

    let request = post_json(
        "/api/v1/auth/login",
        json!({"username": "usuario", "password": "teste"}),
    );
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(CACHE_CONTROL)
            .and_then(|v| v.to_str().ok()),
        Some("no-store")
    );

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], 1800);
    assert_ne!(body["access_token"], body["refresh_token"]);
}

#[rstest]
#[case(json!({"username": "usuario", "password": "wrong"}))]
#[case(json!({"username": "someone", "password": "teste"}))]
#[actix_web::test]
async fn wrong_credentials_are_unauthorised(#[case] body: Value) {
    let ctx = TestContext::sample();
    let app = actix_test::init_service(ctx.app()).await;

    let response = actix_test::call_service(&app, post_json("/api/v1/auth/login", body)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(WWW_AUTHENTICATE));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
}

#[rstest]
#[case(json!({"username": "  usuario  ", "password": "teste"}))]
#[case(json!({"username": "   ", "password": "teste"}))]
#[case(json!({"username": "usuario", "password": ""}))]
#[actix_web::test]
async fn padded_or_blank_credentials_are_unauthorised(#[case] body: Value) {
    let ctx = TestContext::sample();
    let app = actix_test::init_service(ctx.app()).await;

    let response = actix_test::call_service(&app, post_json("/api/v1/auth/login", body)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn malformed_body_is_a_json_bad_request() {
    let ctx = TestContext::sample();
    let app = actix_test::init_service(ctx.app()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"username\":")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "malformed_body");
}

#[actix_web::test]
async fn refresh_rotates_exactly_once() {
    let ctx = TestContext::sample();
    let app = actix_test::init_service(ctx.app()).await;
    let pair = login_pair(&app).await;

    let body = json!({"refresh_token": pair.refresh_token});
    let first = actix_test::call_service(&app, post_json("/api/v1/auth/refresh", body.clone())).await;
    assert_eq!(first.status(), StatusCode::OK);
    let rotated: TokenResponse = actix_test::read_body_json(first).await;
    assert_ne!(rotated.refresh_token, pair.refresh_token);

    let replay = actix_test::call_service(&app, post_json("/api/v1/auth/refresh", body)).await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn refresh_accepts_camel_case_field() {
    let ctx = TestContext::sample();
    let app = actix_test::init_service(ctx.app()).await;
    let pair = login_pair(&app).await;

    let response = actix_test::call_service(
        &app,
        post_json(
            "/api/v1/auth/refresh",
            json!({"refreshToken": pair.refresh_token}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn access_token_cannot_refresh() {
    let ctx = TestContext::sample();
    let app = actix_test::init_service(ctx.app()).await;
    let pair = login_pair(&app).await;

    let response = actix_test::call_service(
        &app,
        post_json(
            "/api/v1/auth/refresh",
            json!({"refresh_token": pair.access_token}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn revoke_is_idempotent_and_blocks_refresh() {
    let ctx = TestContext::sample();
    let app = actix_test::init_service(ctx.app()).await;
    let pair = login_pair(&app).await;
    let body = json!({"refresh_token": pair.refresh_token});

    for _ in 0..2 {
        let response =
            actix_test::call_service(&app, post_json("/api/v1/auth/revoke", body.clone())).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = actix_test::call_service(&app, post_json("/api/v1/auth/refresh", body)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case("/api/v1/auth/refresh")]
#[case("/api/v1/auth/revoke")]
#[actix_web::test]
async fn blank_refresh_token_is_a_bad_request(#[case] uri: &str) {
    let ctx = TestContext::sample();
    let app = actix_test::init_service(ctx.app()).await;

    let response =
        actix_test::call_service(&app, post_json(uri, json!({"refresh_token": "  "}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "empty_token");
}

#[actix_web::test]
async fn me_reports_subject_until_expiry() {
    let ctx = TestContext::sample();
    let app = actix_test::init_service(ctx.app()).await;
    let pair = login_pair(&app).await;
    let bearer = format!("Bearer {}", pair.access_token);

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header((AUTHORIZATION, bearer.clone()))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: MeResponse = actix_test::read_body_json(response).await;
    assert_eq!(body.subject, "usuario");
    let expected = chrono::DateTime::from_timestamp(CLOCK_START + 1800, 0).expect("timestamp");
    assert_eq!(body.expires_at, expected.to_rfc3339());

    ctx.clock.advance_seconds(1800);
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header((AUTHORIZATION, bearer))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case(None)]
#[case(Some("Basic dXNlcjpwYXNz"))]
#[case(Some("Bearer not-a-token"))]
#[actix_web::test]
async fn me_requires_a_valid_bearer(#[case] header: Option<&str>) {
    let ctx = TestContext::sample();
    let app = actix_test::init_service(ctx.app()).await;

    let mut request = actix_test::TestRequest::get().uri("/api/v1/auth/me");
    if let Some(value) = header {
        request = request.insert_header((AUTHORIZATION, value));
    }
    let response = actix_test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
}
