use axum::{middleware, routing::get, Router};
use std::sync::Arc;

use super::controller;
use crate::services::auth_guard::require_auth;
use crate::AppState;

pub fn counsellor_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/counsellors", get(controller::list_counsellors))
        .route("/counsellors/recommended", get(controller::recommended_counsellors))
        .route("/counsellors/{id}", get(controller::get_counsellor))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
