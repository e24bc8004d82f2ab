//! Problem Details responses for failures outside the outcome contract.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::header::{CACHE_CONTROL, CONTENT_TYPE, X_FRAME_OPTIONS};
use http::{HeaderValue, StatusCode};
use login_success_sdk::LoginSuccessError;
use serde::Serialize;

/// RFC-9457 Problem Details body.
#[derive(Debug, Clone, Serialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_url: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: "about:blank".to_owned(),
            title: title.into(),
            status: status.as_u16(),
            detail: detail.into(),
        }
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        with_no_cache_headers(response)
    }
}

/// Error responses of the login endpoint follow the same caching and framing
/// policy as outcome responses.
fn with_no_cache_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    response
}

/// Convert a login success error to a transport response.
///
/// A security violation aborts the request: no outcome payload is written,
/// only a bare 500.
pub fn login_error_to_response(err: &LoginSuccessError) -> Response {
    match err {
        LoginSuccessError::SecurityViolation(msg) => {
            tracing::error!("Session fixation protection failed: {msg}");
            with_no_cache_headers(StatusCode::INTERNAL_SERVER_ERROR.into_response())
        }
        LoginSuccessError::InvalidIdentity(msg) => {
            tracing::debug!("Rejected identity: {msg}");
            Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized", "Invalid authenticated identity")
                .into_response()
        }
        other => {
            tracing::error!("Login success handling failed: {other}");
            Problem::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "Internal login error",
            )
            .into_response()
        }
    }
}
