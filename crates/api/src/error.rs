//! HTTP error type for the RemindCare handlers.
//!
//! Every failure leaves the server as `{ "error": <message>, "code": <CODE> }`.
//! Server-side failures are logged in full and reach the client only as a
//! generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use remindcare_core::error::CoreError;
use remindcare_core::session::SessionError;
use serde::Serialize;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain failure from `remindcare_core` or a repository.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A list filter named a status or appointment type that does not exist.
    #[error("Unknown {param} '{value}'")]
    UnknownFilter { param: &'static str, value: String },

    /// The bearer token failed to decode, verify, or has expired.
    #[error("Invalid or expired token")]
    Token(#[from] SessionError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl AppError {
    /// Status, machine-readable code, and client-facing message.
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::Core(CoreError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string())
            }
            Self::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            Self::Core(CoreError::Conflict(msg)) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            Self::Core(CoreError::Unauthorized(msg)) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            Self::Core(CoreError::Forbidden(msg)) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone())
            }
            Self::Token(e) => {
                tracing::debug!(error = %e, "Rejected bearer token");
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", self.to_string())
            }
            Self::UnknownFilter { .. } => (StatusCode::BAD_REQUEST, "BAD_REQUEST", self.to_string()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            Self::Core(CoreError::Internal(detail)) | Self::InternalError(detail) => {
                tracing::error!(error = %detail, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.classify();
        (status, Json(ErrorBody { error, code })).into_response()
    }
}
