//! # intervue Core
//!
//! Shared domain types for the interview platform: the authenticated
//! principal, interviews and their lifecycle status, participant
//! memberships, messages and pagination.
//!
//! Every enum here is a closed set with fallible parsing from its wire
//! string, so a misspelled status or role is rejected at the boundary
//! instead of flowing through the system.

pub mod types;
pub mod error;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{
    Interview, InterviewFilter, InterviewId, InterviewStatus, Message, NewInterview, Page,
    Participant, ParticipantRole, Principal, Role,
};
