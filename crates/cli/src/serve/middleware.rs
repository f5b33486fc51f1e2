//! HTTP middleware: per-IP rate limiting.

use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::envelope::{failure, Code};
use super::state::AppState;

/// Rate limiting middleware. Checks per-IP request rate before routing.
pub(crate) async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<std::net::SocketAddr>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let ip = addr.ip();
    match state.rate_limiter.check(ip).await {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            tracing::warn!(%ip, retry_after, "rate limit exceeded");
            let mut envelope = failure(Code::RateLimited, "rate limit exceeded");
            envelope.retry_after = Some(retry_after);
            envelope.into_response()
        }
    }
}
