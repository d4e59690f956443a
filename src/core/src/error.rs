//! Error types for the shared domain model
//!
//! Every variant here is a parse or validation failure on a value crossing
//! the boundary from the wire representation into the typed model.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for the intervue domain model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Unknown principal role
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Unknown interview status
    #[error("Invalid interview status: {0}")]
    InvalidStatus(String),

    /// Unknown participant role
    #[error("Invalid participant role: {0}")]
    InvalidParticipantRole(String),

    /// Malformed resource identifier
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Pagination parameters out of range
    #[error("Invalid page: {0}")]
    InvalidPage(String),
}

impl CoreError {
    /// Create an invalid id error
    pub fn invalid_id<S: Into<String>>(msg: S) -> Self {
        CoreError::InvalidId(msg.into())
    }

    /// Create an invalid page error
    pub fn invalid_page<S: Into<String>>(msg: S) -> Self {
        CoreError::InvalidPage(msg.into())
    }
}
