//! Response envelope shared by every endpoint.
//!
//! ```json
//! { "result": { "code": "OK", "message": "" }, "data": { ... } }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Outcome codes carried in `result.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum Code {
    Ok,
    SyntaxError,
    InvalidPayload,
    PayloadTooLarge,
    Timeout,
    RateLimited,
    NotFound,
    MethodNotAllowed,
    InternalError,
}

impl Code {
    pub(crate) fn status(self) -> StatusCode {
        match self {
            Code::Ok => StatusCode::OK,
            Code::SyntaxError | Code::InvalidPayload => StatusCode::BAD_REQUEST,
            Code::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Code::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            Code::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Code::NotFound => StatusCode::NOT_FOUND,
            Code::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Code::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Outcome {
    pub(crate) code: Code,
    pub(crate) message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct Envelope<D: Serialize = (), E: Serialize = ()> {
    pub(crate) result: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) data: Option<D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<E>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) retry_after: Option<u64>,
}

impl<D: Serialize, E: Serialize> IntoResponse for Envelope<D, E> {
    fn into_response(self) -> Response {
        (self.result.code.status(), Json(self)).into_response()
    }
}

/// 200 with `data`.
pub(crate) fn success<D: Serialize>(data: D) -> Envelope<D, ()> {
    Envelope {
        result: Outcome {
            code: Code::Ok,
            message: String::new(),
        },
        data: Some(data),
        error: None,
        retry_after: None,
    }
}

/// An error envelope with only `result` filled in.
pub(crate) fn failure(code: Code, message: impl Into<String>) -> Envelope {
    Envelope {
        result: Outcome {
            code,
            message: message.into(),
        },
        data: None,
        error: None,
        retry_after: None,
    }
}

/// An error envelope carrying a structured `error` payload.
pub(crate) fn failure_with<E: Serialize>(
    code: Code,
    message: impl Into<String>,
    error: E,
) -> Envelope<(), E> {
    Envelope {
        result: Outcome {
            code,
            message: message.into(),
        },
        data: None,
        error: Some(error),
        retry_after: None,
    }
}
