//! # HTTP Errors
//!
//! Maps service failures onto responses. Client errors become
//! `400 Bad Request` with the literal error message as a plain-text body.
//! Store failures become `500` with a fixed body; the detail only goes to
//! the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::observability::Logger;
use crate::service::ServiceError;

/// Result type for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the HTTP layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Service(#[from] ServiceError),

    /// Request payload could not be decoded
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Service(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Request part the caller got wrong, if any
    pub fn parameter(&self) -> Option<&str> {
        match self {
            ApiError::Service(err) => err.parameter(),
            ApiError::InvalidBody(_) => Some("body"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            Logger::error("STORE_FAILURE", &[("detail", message.as_str())]);
            return (status, "Internal error".to_string()).into_response();
        }

        let mut fields = vec![("reason", message.as_str()), ("status", status.as_str())];
        if let Some(parameter) = self.parameter() {
            fields.push(("parameter", parameter));
        }
        Logger::trace("REQUEST_REJECTED", &fields);
        // String bodies are sent as text/plain; charset=utf-8
        (status, message).into_response()
    }
}
