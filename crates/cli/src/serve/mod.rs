//! `funcdef serve` -- HTTP front end for the parser.
//!
//! Exposes the parser as an async HTTP service using `axum` + `tokio`.
//! Parsing itself is synchronous and runs on the blocking pool.
//!
//! Security features:
//! - Input validation (size, encoding) before parsing
//! - Per-request parse time limit
//! - CORS headers on all responses (permissive for local dev)
//! - Per-IP rate limiting (default: 60 req/min, configurable)
//!
//! Endpoints:
//! - POST /        - Parse the request body as a FUNC script
//! - GET  /health  - Server status
//!
//! All responses use Content-Type: application/json.

mod envelope;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{middleware as axum_middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use self::handlers::{
    handle_health, handle_method_not_allowed, handle_not_found, handle_parse,
};
use self::middleware::rate_limit_middleware;
use self::state::{AppState, RateLimiter};

/// Default maximum script size for `POST /`: 64 KiB.
pub(crate) const MAX_SOURCE_SIZE: usize = 64 * 1024;

/// Default rate limit: 60 requests per minute per IP.
const DEFAULT_RATE_LIMIT: u64 = 60;

/// Rate limit window duration in seconds (1 minute).
const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Settings taken from the command line.
#[derive(Debug, Clone)]
pub(crate) struct ServeConfig {
    pub(crate) port: u16,
    pub(crate) max_source_size: usize,
    pub(crate) timeout: Duration,
}

fn build_router(state: Arc<AppState>, body_limit: usize) -> Router {
    // CORS: permissive for local dev
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route(
            "/",
            post(handle_parse).fallback(handle_method_not_allowed),
        )
        .route(
            "/health",
            get(handle_health).fallback(handle_method_not_allowed),
        )
        .fallback(handle_not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(cors)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and run until Ctrl+C.
///
/// Rate limit: per-IP, from `FUNCDEF_RATE_LIMIT` (default 60 req/min).
pub(crate) async fn start_server(config: ServeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let rate_limit = std::env::var("FUNCDEF_RATE_LIMIT")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_RATE_LIMIT);

    tracing::info!(
        rate_limit,
        max_source_size = config.max_source_size,
        timeout_ms = config.timeout.as_millis() as u64,
        "server configuration"
    );

    let state = Arc::new(AppState {
        rate_limiter: RateLimiter::new(rate_limit, Duration::from_secs(RATE_LIMIT_WINDOW_SECS)),
        max_source_size: config.max_source_size,
        parse_timeout: config.timeout,
    });

    // Bodies over the limit are rejected while buffering; the parse
    // handler turns that rejection into a 413 envelope.
    let app = build_router(state, config.max_source_size);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("funcdef listening on http://{}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server shut down");
    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal");
}
