use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;

use super::MetricsRegistry;

/// Middleware to collect HTTP request metrics
pub async fn metrics_middleware(
    State(metrics): State<Arc<MetricsRegistry>>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    metrics
        .http_requests_total
        .with_label_values(&[&method, &path, &status])
        .inc();

    metrics
        .http_request_duration_seconds
        .with_label_values(&[&method, &path])
        .observe(duration);

    response
}

/// Normalize path to reduce cardinality
/// Converts /api/v1/sessions/12/cancel -> /api/v1/sessions/:id/cancel
fn normalize_path(path: &str) -> String {
    // Upload file names are unbounded.
    if path.starts_with("/uploads/") {
        return "/uploads/:file".to_string();
    }

    let normalized: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| if is_id_like(segment) { ":id" } else { segment })
        .collect();

    format!("/{}", normalized.join("/"))
}

fn is_id_like(segment: &str) -> bool {
    segment.chars().all(|c| c.is_ascii_digit())
}
