use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::services::auth_guard::require_auth;
use crate::AppState;

pub fn user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/profile",
            get(controller::get_profile).put(controller::update_profile),
        )
        .route("/location", post(controller::update_location))
        .route("/preferences", post(controller::update_preferences))
        .route("/upload-photo", post(controller::upload_photo))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
