use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

use crate::error::ApiError;
use crate::AppState;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Identity of the caller, inserted by [`require_auth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
}

/// Rejects the request with 401 unless it carries a valid bearer token.
/// Every failure looks the same to the caller; the cause is only logged.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        warn!(uri = %request.uri(), "Missing or malformed Authorization header");
        ApiError::Unauthorized
    })?;

    let claims = state.jwt_service.verify_token(token).map_err(|e| {
        warn!(uri = %request.uri(), error = %e, "Bearer token rejected");
        ApiError::Unauthorized
    })?;

    request
        .extensions_mut()
        .insert(AuthUser { id: claims.user_id });

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or(ApiError::Unauthorized)
    }
}

/// Gate for `/admin`. Open when no admin key is configured.
pub async fn require_admin_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(expected) = state.admin_api_key.as_deref() {
        let presented = request
            .headers()
            .get(ADMIN_KEY_HEADER)
            .and_then(|value| value.to_str().ok());

        if presented != Some(expected) {
            warn!(uri = %request.uri(), "Admin request without a valid admin key");
            return Err(ApiError::Unauthorized);
        }
    }

    Ok(next.run(request).await)
}
