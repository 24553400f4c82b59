use axum::http::StatusCode;
use chrono::Duration;
use lampy_backend::services::jwt::JwtService;
use serde_json::{json, Value};

use crate::common::{api, TestContext, TEST_JWT_SECRET};

#[tokio::test]
async fn test_protected_route_without_token() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get(&api("/users/profile")).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>(), json!({ "error": "Unauthorized" }));

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_protected_route_with_garbage_token() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .get(&api("/sessions"))
        .authorization_bearer("definitely-not-a-jwt")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let ctx = TestContext::new().await;
    let (_, user_id) = ctx.register_user("Expired").await;

    let expired = JwtService::with_token_duration(TEST_JWT_SECRET.to_string(), Duration::hours(-2))
        .create_token(user_id)
        .unwrap();

    let response = ctx
        .server
        .get(&api("/users/profile"))
        .authorization_bearer(&expired)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let ctx = TestContext::new().await;
    let (_, user_id) = ctx.register_user("Forged").await;

    let forged = JwtService::new("some-other-secret".to_string())
        .create_token(user_id)
        .unwrap();

    let response = ctx
        .server
        .get(&api("/counsellors"))
        .authorization_bearer(&forged)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_fresh_token_is_accepted() {
    let ctx = TestContext::new().await;
    let (_, user_id) = ctx.register_user("Fresh").await;

    let token = JwtService::new(TEST_JWT_SECRET.to_string())
        .create_token(user_id)
        .unwrap();

    let response = ctx
        .server
        .get(&api("/users/profile"))
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["id"], user_id);

    ctx.cleanup().await;
}
