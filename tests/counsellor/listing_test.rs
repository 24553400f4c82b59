use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{api, counsellor_body, TestContext};

fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_list_only_available_counsellors() {
    let ctx = TestContext::new().await;
    let (token, _) = ctx.register_user("Seeker").await;

    ctx.create_counsellor(counsellor_body("Dr. Open", 4.5, &["Anxiety"], true))
        .await;
    ctx.create_counsellor(counsellor_body("Dr. Away", 4.9, &["Anxiety"], false))
        .await;

    let response = ctx
        .server
        .get(&api("/counsellors"))
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(names(&body), vec!["Dr. Open"]);
    assert_eq!(body[0]["specialties"], json!(["Anxiety"]));
    assert_eq!(body[0]["available"], true);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_list_filters_by_every_specialty() {
    let ctx = TestContext::new().await;
    let (token, _) = ctx.register_user("Filter").await;

    ctx.create_counsellor(counsellor_body("Both", 4.0, &["Anxiety", "Stress"], true))
        .await;
    ctx.create_counsellor(counsellor_body("Anxiety Only", 4.0, &["Anxiety"], true))
        .await;
    ctx.create_counsellor(counsellor_body("Substring", 4.0, &["Anxiety Disorders"], true))
        .await;

    let single: Value = ctx
        .server
        .get(&api("/counsellors"))
        .add_query_param("specialties", "anxiety")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(names(&single), vec!["Both", "Anxiety Only"]);

    let both: Value = ctx
        .server
        .get(&api("/counsellors"))
        .add_query_param("specialties", "Anxiety, Stress")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(names(&both), vec!["Both"]);

    let none: Value = ctx
        .server
        .get(&api("/counsellors"))
        .add_query_param("specialties", "Grief")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(none, json!([]));

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_get_counsellor_by_id() {
    let ctx = TestContext::new().await;
    let (token, _) = ctx.register_user("Viewer").await;
    let id = ctx
        .create_counsellor(counsellor_body("Dr. Away", 4.2, &["Couples"], false))
        .await;

    // Unavailable counsellors are still visible by id.
    let response = ctx
        .server
        .get(&api(&format!("/counsellors/{}", id)))
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], id);
    assert_eq!(body["rating"], 4.2);
    assert_eq!(body["available"], false);

    let missing = ctx
        .server
        .get(&api("/counsellors/99999"))
        .authorization_bearer(&token)
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["error"], "Counsellor not found");

    ctx.server
        .get(&api("/counsellors/not-a-number"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_counsellors_require_auth() {
    let ctx = TestContext::new().await;

    ctx.server
        .get(&api("/counsellors"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_malformed_query_returns_json_error() {
    let ctx = TestContext::new().await;
    let (token, _) = ctx.register_user("Repeat").await;

    let response = ctx
        .server
        .get(&api("/counsellors?specialties=Anxiety&specialties=Grief"))
        .authorization_bearer(&token)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().is_some_and(|e| e.contains("specialties")));

    ctx.cleanup().await;
}
