//! Participant memberships and interview messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::interview::InterviewId;
use super::principal::Role;
use crate::error::CoreError;

/// Role a member plays inside one interview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Interviewer,
    Candidate,
}

impl ParticipantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Interviewer => "interviewer",
            ParticipantRole::Candidate => "candidate",
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipantRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interviewer" => Ok(ParticipantRole::Interviewer),
            "candidate" => Ok(ParticipantRole::Candidate),
            other => Err(CoreError::InvalidParticipantRole(other.to_string())),
        }
    }
}

/// Membership of one identity in one interview
///
/// At most one row exists per (interview, identity) pair. Rows are created
/// by an admin and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub interview_id: InterviewId,
    pub identity: String,
    pub participant_role: ParticipantRole,
    pub added_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(
        interview_id: InterviewId,
        identity: impl Into<String>,
        participant_role: ParticipantRole,
    ) -> Self {
        Self {
            interview_id,
            identity: identity.into(),
            participant_role,
            added_at: Utc::now(),
        }
    }
}

/// A chat message posted inside an interview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub interview_id: InterviewId,
    pub sender: String,
    pub sender_role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
