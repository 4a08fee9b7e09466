//! Error types for store commands.
//!
//! Commands distinguish four failure kinds so tests and callers can tell
//! them apart; a UI is free to collapse `NotFound` back to the silent no-op
//! the screens expect. `CommandError` is the serializable form handed across
//! the presentation boundary.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// Unknown email and wrong password both land here; no oracle.
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("not authorized: {0}")]
    Unauthorized(String),

    #[error("internal state error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Returns true if this error means "record absent", the one failure a
    /// UI treats as a valid terminal outcome rather than an error state.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Returns true if this error is an authentication or authorization
    /// failure (prompt for sign-in rather than showing a form error).
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            StoreError::AuthenticationFailed | StoreError::Unauthorized(_)
        )
    }
}

/// Serializable error representation for the presentation boundary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    pub message: String,
    pub kind: ErrorKind,
    /// True when the UI should swallow the error as a no-op.
    pub silent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    NotFound,
    ValidationFailed,
    AuthenticationFailed,
    Unauthorized,
    Internal,
}

impl From<&StoreError> for CommandError {
    fn from(err: &StoreError) -> Self {
        let kind = match err {
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::ValidationFailed(_) => ErrorKind::ValidationFailed,
            StoreError::AuthenticationFailed => ErrorKind::AuthenticationFailed,
            StoreError::Unauthorized(_) => ErrorKind::Unauthorized,
            StoreError::Internal(_) => ErrorKind::Internal,
        };

        CommandError {
            message: err.to_string(),
            kind,
            silent: err.is_not_found(),
        }
    }
}
