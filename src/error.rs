//! Switchifier error types with HTTP status code mapping.
//!
//! [`SwitchifierError`] is the central error type for the recorder and the
//! HTTP layer. Each variant maps to a specific HTTP status code and to a
//! public message that is safe to show to clients. The full error text
//! (which may contain database internals) only ever goes to the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// JSON body returned for failed requests.
///
/// Shares the `okay`/`error` keys of the status envelope so that clients
/// can parse every response of the service the same way:
/// ```json
/// { "okay": false, "error": "Database error." }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    pub okay: bool,
    /// Human-readable, non-sensitive message.
    pub error: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant        | HTTP Status               | Public message          |
/// |----------------|---------------------------|-------------------------|
/// | `Storage`      | 500 Internal Server Error | `Database error.`       |
/// | `NoData`       | 404 Not Found (unused)    | `No switch state yet.`  |
/// | `Validation`   | 400 Bad Request           | `Bad request.`          |
/// | `Unauthorized` | 403 Forbidden             | `Forbidden.`            |
///
/// No current route turns `NoData` into a response: the status endpoint
/// reports it inside a `200` envelope instead.
#[derive(Debug, thiserror::Error)]
pub enum SwitchifierError {
    /// Reading from or writing to the event log failed.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// The event log holds no state change yet.
    #[error("no switch state recorded yet")]
    NoData,

    /// Malformed or missing request input.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Wrong shared secret or wrong request method.
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),
}

impl SwitchifierError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NoData => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::FORBIDDEN,
        }
    }

    /// Returns the message exposed to clients.
    ///
    /// Never includes the underlying error text.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::Storage(_) => "Database error.",
            Self::NoData => "No switch state yet.",
            Self::Validation(_) => "Bad request.",
            Self::Unauthorized(_) => "Forbidden.",
        }
    }
}

impl IntoResponse for SwitchifierError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            okay: false,
            error: self.public_message().to_string(),
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            SwitchifierError::Storage(sqlx::Error::PoolClosed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(SwitchifierError::NoData.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            SwitchifierError::Validation("empty value".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SwitchifierError::Unauthorized("bad secret").status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn public_message_hides_storage_details() {
        let err = SwitchifierError::Storage(sqlx::Error::Protocol("disk image is malformed".into()));
        assert!(err.to_string().contains("malformed"));
        assert_eq!(err.public_message(), "Database error.");
    }

    #[test]
    fn no_data_is_distinct_from_storage() {
        assert_ne!(
            SwitchifierError::NoData.public_message(),
            SwitchifierError::Storage(sqlx::Error::PoolClosed).public_message()
        );
    }
}
