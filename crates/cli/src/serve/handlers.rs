//! Route handlers: parse, health, fallbacks.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use funcdef_core::{ParseError, ParseOptions};

use super::envelope::{failure, failure_with, success, Code};
use super::state::AppState;

/// Fallback handler for unmatched routes.
pub(crate) async fn handle_not_found() -> impl IntoResponse {
    failure(Code::NotFound, "not found")
}

pub(crate) async fn handle_method_not_allowed() -> impl IntoResponse {
    failure(Code::MethodNotAllowed, "method not allowed")
}

/// GET /health
pub(crate) async fn handle_health() -> impl IntoResponse {
    let response = serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(response))
}

/// POST / -- the body is the script text.
pub(crate) async fn handle_parse(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let started = Instant::now();
    let (code, response) = parse_body(&state, body).await;
    tracing::info!(
        code = ?code,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "parse request"
    );
    response
}

async fn parse_body(state: &AppState, body: Result<Bytes, BytesRejection>) -> (Code, Response) {
    // --- Input validation (before parsing) ---

    let bytes = match body {
        Ok(b) => b,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return too_large(state.max_source_size);
        }
        Err(rejection) => {
            let message = format!("could not read request body: {}", rejection.body_text());
            return (
                Code::InvalidPayload,
                failure(Code::InvalidPayload, message).into_response(),
            );
        }
    };

    if bytes.len() > state.max_source_size {
        return too_large(state.max_source_size);
    }

    let source = match String::from_utf8(bytes.to_vec()) {
        Ok(s) => s,
        Err(e) => {
            let message = format!("request body is not valid UTF-8: {}", e.utf8_error());
            return (
                Code::InvalidPayload,
                failure(Code::InvalidPayload, message).into_response(),
            );
        }
    };

    // --- Parse off the async runtime, under a time limit ---

    let task = tokio::task::spawn_blocking(move || {
        funcdef_core::parse(&source, &ParseOptions::default())
    });

    match tokio::time::timeout(state.parse_timeout, task).await {
        Ok(Ok(Ok(def))) => (Code::Ok, success(def).into_response()),
        Ok(Ok(Err(ParseError::Syntax(err)))) => {
            let message = err.message.clone();
            (
                Code::SyntaxError,
                failure_with(Code::SyntaxError, message, err).into_response(),
            )
        }
        Ok(Ok(Err(e))) => (
            Code::InternalError,
            failure(Code::InternalError, e.to_string()).into_response(),
        ),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "parse task failed");
            (
                Code::InternalError,
                failure(Code::InternalError, format!("parse task failed: {}", e)).into_response(),
            )
        }
        Err(_) => (
            Code::Timeout,
            failure(
                Code::Timeout,
                format!(
                    "parse did not finish within {} ms",
                    state.parse_timeout.as_millis()
                ),
            )
            .into_response(),
        ),
    }
}

fn too_large(limit: usize) -> (Code, Response) {
    let message = format!("source exceeds maximum size of {} bytes", limit);
    (
        Code::PayloadTooLarge,
        failure(Code::PayloadTooLarge, message).into_response(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::serve::state::RateLimiter;

    fn state(parse_timeout: Duration) -> AppState {
        AppState {
            rate_limiter: RateLimiter::new(60, Duration::from_secs(60)),
            max_source_size: 1024 * 1024,
            parse_timeout,
        }
    }

    /// A valid script whose body takes a while to scan.
    fn long_script() -> Bytes {
        let body = "step(); ".repeat(50_000);
        Bytes::from(format!("FUNC Slow () BEGIN {} END @k=\"v\";", body))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn parse_timeout_returns_503() {
        let (code, response) = parse_body(&state(Duration::ZERO), Ok(long_script())).await;
        assert_eq!(code, Code::Timeout);
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert_eq!(json["result"]["code"], "TIMEOUT");
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn long_script_parses_within_a_generous_limit() {
        let (code, response) =
            parse_body(&state(Duration::from_secs(30)), Ok(long_script())).await;
        assert_eq!(code, Code::Ok);
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["functionName"], "Slow");
    }

    #[tokio::test]
    async fn oversized_body_is_rejected_before_parsing() {
        let mut small = state(Duration::from_secs(30));
        small.max_source_size = 8;
        let (code, response) = parse_body(&small, Ok(long_script())).await;
        assert_eq!(code, Code::PayloadTooLarge);
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
