//! Error types for the access-control engine

use intervue_core::{CoreError, InterviewStatus};
use thiserror::Error;

use crate::store::StoreError;

/// Authorization engine errors
///
/// Every variant is terminal for the operation that produced it. None of
/// them is retried inside the engine.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Resource absent, or present but not visible to the caller
    ///
    /// Both cases render identically so that non-participants cannot learn
    /// whether a resource exists.
    #[error("{0} not found")]
    NotFound(String),

    /// Role is not allowed to perform an otherwise valid operation
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Status change rejected by the transition table
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition {
        from: InterviewStatus,
        to: InterviewStatus,
    },

    /// Persistence collaborator failed, passed through as-is
    #[error("Persistence failure: {0}")]
    Persistence(#[from] StoreError),

    /// Malformed caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Write collides with existing state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthzError {
    /// Disguised not-found for an interview
    pub fn interview_not_found() -> Self {
        AuthzError::NotFound("Interview".to_string())
    }

    /// Create a permission denied error
    pub fn permission_denied<S: Into<String>>(msg: S) -> Self {
        AuthzError::PermissionDenied(msg.into())
    }
}

impl From<CoreError> for AuthzError {
    fn from(err: CoreError) -> Self {
        AuthzError::InvalidInput(err.to_string())
    }
}

impl From<serde_json::Error> for AuthzError {
    fn from(err: serde_json::Error) -> Self {
        AuthzError::Internal(format!("cache value conversion failed: {}", err))
    }
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
