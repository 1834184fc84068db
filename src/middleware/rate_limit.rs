use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use governor::{clock::DefaultClock, state::keyed::DashMapStateStore, Quota, RateLimiter};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::config;
use crate::error::ApiError;

pub type SharedRateLimiter = Arc<RateLimiter<IpAddr, DashMapStateStore<IpAddr>, DefaultClock>>;

/// Build the per-IP keyed limiter from the configured per-minute quota.
pub fn build_rate_limiter(requests_per_minute: u32) -> SharedRateLimiter {
    let quota = Quota::per_minute(NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN));
    Arc::new(RateLimiter::dashmap(quota))
}

/// Per-IP rate limiting middleware. Runs before authentication so an
/// over-quota caller fails fast without reaching the guard or the store.
pub async fn rate_limit_middleware(
    State(limiter): State<SharedRateLimiter>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !config::config().api.enable_rate_limiting {
        return Ok(next.run(request).await);
    }

    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|connect_info| connect_info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

    if limiter.check_key(&ip).is_err() {
        tracing::warn!(%ip, "rate limit exceeded");
        return Err(ApiError::too_many_requests(
            "Too many requests. Please try again later.",
        ));
    }

    Ok(next.run(request).await)
}
