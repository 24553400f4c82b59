use serde_json::json;

use crate::common::{api, counsellor_body, TestContext};

#[tokio::test]
async fn test_metrics_endpoint_exposes_domain_counters() {
    let ctx = TestContext::new().await;
    let (token, _) = ctx.register_user("Metered").await;
    let counsellor_id = ctx
        .create_counsellor(counsellor_body("Dr. Metric", 4.0, &[], true))
        .await;

    ctx.server
        .post(&api("/sessions/book"))
        .authorization_bearer(&token)
        .json(&json!({
            "counsellor_id": counsellor_id,
            "session_date": "2030-03-01T10:30:00Z",
            "duration": 30
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    ctx.server
        .get(&api(&format!("/counsellors/{}", counsellor_id)))
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let response = ctx.server.get("/metrics").await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("lampy_users_registered_total 1"));
    assert!(text.contains("lampy_sessions_booked_total 1"));
    assert!(text.contains("lampy_http_requests_total"));
    // Ids are collapsed so each route is one series.
    assert!(text.contains("/api/v1/counsellors/:id"));
    assert!(!text.contains(&format!("/api/v1/counsellors/{}\"", counsellor_id)));

    ctx.cleanup().await;
}
