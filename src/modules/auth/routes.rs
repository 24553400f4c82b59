use axum::{middleware, routing::post, Router};
use std::sync::Arc;

use super::controller;
use crate::services::auth_guard::require_auth;
use crate::AppState;

pub fn auth_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let verification = Router::new()
        .route("/verify-photo", post(controller::verify_photo))
        .route("/verify-age", post(controller::verify_age))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/register", post(controller::register))
        .route("/login", post(controller::login))
        .merge(verification)
}
