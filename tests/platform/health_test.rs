use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{api, TestContext};

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].is_string());

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_root_banner() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("LAMPY"));

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_security_headers() {
    let ctx = TestContext::new().await;
    let (token, _) = ctx.register_user("Headers").await;

    let response = ctx
        .server
        .get(&api("/users/profile"))
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-content-type-options"), "nosniff");
    assert_eq!(response.header("x-frame-options"), "DENY");
    assert_eq!(response.header("cache-control"), "no-store");

    // Error responses carry them too.
    let missing = ctx.server.get(&api("/sessions")).await;
    missing.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(missing.header("x-content-type-options"), "nosniff");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_unknown_route() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get(&api("/nothing-here")).await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), json!({ "error": "Route not found" }));

    let outside_api = ctx.server.post("/no/such/path").await;
    outside_api.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(outside_api.json::<Value>()["error"], "Route not found");

    ctx.cleanup().await;
}
