use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::services::auth_guard::require_auth;
use crate::AppState;

pub fn session_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions", get(controller::list_sessions))
        .route("/sessions/book", post(controller::book_session))
        .route("/sessions/{id}", get(controller::get_session))
        .route("/sessions/{id}/cancel", put(controller::cancel_session))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
