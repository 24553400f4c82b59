use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{api, counsellor_body, TestContext};

async fn session_count(ctx: &TestContext) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions")
        .fetch_one(&ctx.db)
        .await
        .unwrap();
    count
}

#[tokio::test]
async fn test_book_session_success() {
    let ctx = TestContext::new().await;
    let (token, user_id) = ctx.register_user("Booker").await;
    let counsellor_id = ctx
        .create_counsellor(counsellor_body("Dr. Kiran", 4.7, &["Anxiety"], true))
        .await;

    let response = ctx
        .server
        .post(&api("/sessions/book"))
        .authorization_bearer(&token)
        .json(&json!({
            "counsellor_id": counsellor_id,
            "session_date": "2030-03-01T10:30:00Z",
            "duration": 60,
            "notes": "  First session  "
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["user_id"], user_id);
    assert_eq!(body["counsellor_id"], counsellor_id);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["duration"], 60);
    assert_eq!(body["notes"], "First session");
    assert_eq!(body["session_date"], "2030-03-01T10:30:00Z");
    assert_eq!(body["counsellor"]["name"], "Dr. Kiran");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_book_unavailable_counsellor_creates_nothing() {
    let ctx = TestContext::new().await;
    let (token, _) = ctx.register_user("Unlucky").await;
    let counsellor_id = ctx
        .create_counsellor(counsellor_body("Dr. Busy", 4.7, &["Anxiety"], false))
        .await;

    let response = ctx
        .server
        .post(&api("/sessions/book"))
        .authorization_bearer(&token)
        .json(&json!({
            "counsellor_id": counsellor_id,
            "session_date": "2030-03-01T10:30:00Z",
            "duration": 45
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Counsellor is not available");
    assert_eq!(session_count(&ctx).await, 0);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_book_unknown_counsellor() {
    let ctx = TestContext::new().await;
    let (token, _) = ctx.register_user("Lost").await;

    let response = ctx
        .server
        .post(&api("/sessions/book"))
        .authorization_bearer(&token)
        .json(&json!({
            "counsellor_id": 4242,
            "session_date": "2030-03-01T10:30:00Z",
            "duration": 45
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(session_count(&ctx).await, 0);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_book_rejects_other_date_formats() {
    let ctx = TestContext::new().await;
    let (token, _) = ctx.register_user("Dates").await;
    let counsellor_id = ctx
        .create_counsellor(counsellor_body("Dr. Clock", 4.0, &[], true))
        .await;

    for date in ["2030-03-01", "2030-03-01 10:30:00", "2030-03-01T10:30:00+05:30"] {
        ctx.server
            .post(&api("/sessions/book"))
            .authorization_bearer(&token)
            .json(&json!({
                "counsellor_id": counsellor_id,
                "session_date": date,
                "duration": 30
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    assert_eq!(session_count(&ctx).await, 0);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_book_rejects_bad_duration() {
    let ctx = TestContext::new().await;
    let (token, _) = ctx.register_user("Duration").await;
    let counsellor_id = ctx
        .create_counsellor(counsellor_body("Dr. Time", 4.0, &[], true))
        .await;

    for duration in [0, -30] {
        ctx.server
            .post(&api("/sessions/book"))
            .authorization_bearer(&token)
            .json(&json!({
                "counsellor_id": counsellor_id,
                "session_date": "2030-03-01T10:30:00Z",
                "duration": duration
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_list_sessions_newest_first_and_scoped() {
    let ctx = TestContext::new().await;
    let (token, _) = ctx.register_user("Owner").await;
    let (other_token, _) = ctx.register_user("Other").await;
    let counsellor_id = ctx
        .create_counsellor(counsellor_body("Dr. List", 4.0, &[], true))
        .await;

    for date in ["2030-01-01T09:00:00Z", "2030-06-01T09:00:00Z", "2030-03-01T09:00:00Z"] {
        ctx.server
            .post(&api("/sessions/book"))
            .authorization_bearer(&token)
            .json(&json!({
                "counsellor_id": counsellor_id,
                "session_date": date,
                "duration": 30
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let body: Value = ctx
        .server
        .get(&api("/sessions"))
        .authorization_bearer(&token)
        .await
        .json();

    let dates: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["session_date"].as_str().unwrap())
        .collect();
    assert_eq!(
        dates,
        vec!["2030-06-01T09:00:00Z", "2030-03-01T09:00:00Z", "2030-01-01T09:00:00Z"]
    );
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["counsellor"]["name"] == "Dr. List"));

    let others: Value = ctx
        .server
        .get(&api("/sessions"))
        .authorization_bearer(&other_token)
        .await
        .json();
    assert_eq!(others, json!([]));

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_get_session_of_another_user_is_not_found() {
    let ctx = TestContext::new().await;
    let (token, _) = ctx.register_user("Owner").await;
    let (other_token, _) = ctx.register_user("Snoop").await;
    let counsellor_id = ctx
        .create_counsellor(counsellor_body("Dr. Private", 4.0, &[], true))
        .await;

    let session: Value = ctx
        .server
        .post(&api("/sessions/book"))
        .authorization_bearer(&token)
        .json(&json!({
            "counsellor_id": counsellor_id,
            "session_date": "2030-03-01T10:30:00Z",
            "duration": 50
        }))
        .await
        .json();
    let path = api(&format!("/sessions/{}", session["id"]));

    let own = ctx.server.get(&path).authorization_bearer(&token).await;
    own.assert_status_ok();
    assert_eq!(own.json::<Value>()["counsellor"]["id"], counsellor_id);

    ctx.server
        .get(&path)
        .authorization_bearer(&other_token)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    ctx.cleanup().await;
}
