//! Shared types for the intervue platform

pub mod principal;
pub mod interview;
pub mod participant;
pub mod page;

// Re-export commonly used types
pub use principal::{Principal, Role};
pub use interview::{Interview, InterviewFilter, InterviewId, InterviewStatus, NewInterview};
pub use participant::{Message, Participant, ParticipantRole};
pub use page::Page;
