pub mod config;
pub mod error;
pub mod extract;
pub mod modules;
pub mod services;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer,
};

use config::{Config, DbPool};
use error::ApiError;
use modules::{
    admin::admin_routes, auth::auth_routes, counsellor::counsellor_routes,
    session::session_routes, user::user_routes,
};
use services::jwt::JwtService;
use services::metrics::{metrics_middleware, MetricsRegistry};
use services::rate_limit::{create_rate_limiter, RateLimitLayer};
use services::security::security_headers;
use services::storage::{UploadPurpose, UploadStore};

pub const API_PREFIX: &str = "/api/v1";

/// Everything a handler may touch, built once in `create_app`.
pub struct AppState {
    pub db: DbPool,
    pub jwt_service: JwtService,
    pub uploads: UploadStore,
    pub metrics: Arc<MetricsRegistry>,
    pub admin_api_key: Option<String>,
}

pub fn create_app(db: DbPool, config: &Config) -> Result<Router, prometheus::Error> {
    let metrics = Arc::new(MetricsRegistry::new()?);

    if config.admin_api_key.is_none() {
        tracing::warn!("ADMIN_API_KEY is not set; /admin routes accept unauthenticated requests");
    }

    let state = Arc::new(AppState {
        db,
        jwt_service: JwtService::new(config.jwt_secret.clone()),
        uploads: UploadStore::new(&config.upload_dir),
        metrics: metrics.clone(),
        admin_api_key: config.admin_api_key.clone(),
    });

    let rate_limiter = create_rate_limiter(config.rate_limit_per_second, config.rate_limit_burst);

    let api = Router::new()
        .nest("/auth", auth_routes(state.clone()))
        .nest("/users", user_routes(state.clone()))
        .merge(counsellor_routes(state.clone()))
        .merge(session_routes(state.clone()))
        .nest("/admin", admin_routes(state.clone()));

    // Only profile photos are public; verification documents stay private.
    let profile_photos = ServeDir::new(state.uploads.directory(UploadPurpose::ProfilePhoto));

    Ok(Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(get_metrics))
        .nest(API_PREFIX, api)
        .nest_service("/uploads/profiles", profile_photos)
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(metrics, metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
        .layer(RateLimitLayer::new(rate_limiter))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state))
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route")
}

async fn root() -> &'static str {
    "LAMPY Counselling API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: DateTime<Utc>,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}

async fn get_metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.export() {
        Ok(output) => (
            StatusCode::OK,
            [("Content-Type", "text/plain; version=0.0.4")],
            output,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to export metrics: {}", e),
        )
            .into_response(),
    }
}
