use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::services::auth_guard::require_admin_key;
use crate::AppState;

pub fn admin_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/counsellors", post(controller::create_counsellor))
        .route("/verifications", get(controller::list_verifications))
        .route(
            "/verifications/{id}/approve",
            post(controller::approve_verification),
        )
        .route(
            "/verifications/{id}/reject",
            post(controller::reject_verification),
        )
        .route_layer(middleware::from_fn_with_state(state, require_admin_key))
}
