use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{api, counsellor_body, TestContext};

#[tokio::test]
async fn test_create_counsellor() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post(&api("/admin/counsellors"))
        .json(&counsellor_body("Dr. New", 4.6, &["Anxiety", " Stress "], true))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body["id"].as_i64().is_some());
    assert_eq!(body["name"], "Dr. New");
    assert_eq!(body["role"], "Counselling Psychologist");
    assert_eq!(body["rating"], 4.6);
    assert_eq!(body["total_ratings"], 12);
    assert_eq!(body["specialties"], json!(["Anxiety", "Stress"]));
    assert_eq!(body["available"], true);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_create_counsellor_defaults() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post(&api("/admin/counsellors"))
        .json(&json!({ "name": "Dr. Minimal", "role": "Therapist" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["available"], true);
    assert_eq!(body["rating"], 0.0);
    assert_eq!(body["total_ratings"], 0);
    assert_eq!(body["specialties"], json!([]));

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_create_counsellor_validation() {
    let ctx = TestContext::new().await;

    for body in [
        json!({ "role": "Therapist" }),
        json!({ "name": "Dr. Roleless" }),
        json!({ "name": "  ", "role": "Therapist" }),
        json!({ "name": "Dr. Rating", "role": "Therapist", "rating": 5.5 }),
        json!({ "name": "Dr. Negative", "role": "Therapist", "total_ratings": -1 }),
    ] {
        ctx.server
            .post(&api("/admin/counsellors"))
            .json(&body)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM counsellors")
        .fetch_one(&ctx.db)
        .await
        .unwrap();
    assert_eq!(count, 0);

    ctx.cleanup().await;
}
