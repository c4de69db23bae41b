//! Domain error type shared by the API handlers and repositories.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A patient or reminder id that does not exist in the roster.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A form field failed its rule; the message is shown to staff as-is.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request collides with existing data (e.g. duplicate patient email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, malformed, or expired credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but the role may not perform the action.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
