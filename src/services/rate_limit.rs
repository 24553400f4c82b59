use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{future::Future, num::NonZeroU32, pin::Pin, sync::Arc};
use tower::{Layer, Service};

use crate::error::ErrorResponse;

pub type GlobalRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Token bucket refilled at `per_second`, holding at most `burst` tokens.
/// Zero values are clamped to one.
pub fn create_rate_limiter(per_second: u32, burst: u32) -> GlobalRateLimiter {
    let per_second = NonZeroU32::new(per_second).unwrap_or(NonZeroU32::MIN);
    let burst = NonZeroU32::new(burst).unwrap_or(NonZeroU32::MIN);
    let quota = Quota::per_second(per_second).allow_burst(burst);
    Arc::new(RateLimiter::direct(quota))
}

#[derive(Clone)]
pub struct RateLimitLayer {
    limiter: GlobalRateLimiter,
}

impl RateLimitLayer {
    pub fn new(limiter: GlobalRateLimiter) -> Self {
        Self { limiter }
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimitService {
            inner,
            limiter: self.limiter.clone(),
        }
    }
}

#[derive(Clone)]
pub struct RateLimitService<S> {
    inner: S,
    limiter: GlobalRateLimiter,
}

impl<S> Service<Request<Body>> for RateLimitService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let limiter = self.limiter.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if limiter.check().is_err() {
                tracing::warn!(uri = %request.uri(), "Rate limit exceeded");
                return Ok((
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(ErrorResponse::new("Too many requests")),
                )
                    .into_response());
            }
            inner.call(request).await
        })
    }
}
