//! Interview resource and its lifecycle status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

/// Opaque unique identifier of an interview
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterviewId(String);

impl InterviewId {
    /// Parse an identifier received from a caller
    ///
    /// Identifiers are opaque; the only requirement is that they are not blank.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, CoreError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CoreError::invalid_id("interview id must not be empty"));
        }
        Ok(InterviewId(trimmed.to_string()))
    }

    /// Generate a fresh identifier
    pub fn generate() -> Self {
        InterviewId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for InterviewId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InterviewId::parse(s)
    }
}

/// Interview lifecycle status
///
/// `Scheduled` is the only initial state. `Completed` and `Cancelled` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
}

impl InterviewStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [InterviewStatus; 4] = [
        InterviewStatus::Scheduled,
        InterviewStatus::Ongoing,
        InterviewStatus::Completed,
        InterviewStatus::Cancelled,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Ongoing => "ongoing",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
        }
    }

    /// Whether no further transitions are possible from this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, InterviewStatus::Completed | InterviewStatus::Cancelled)
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterviewStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(InterviewStatus::Scheduled),
            "ongoing" => Ok(InterviewStatus::Ongoing),
            "completed" => Ok(InterviewStatus::Completed),
            "cancelled" => Ok(InterviewStatus::Cancelled),
            other => Err(CoreError::InvalidStatus(other.to_string())),
        }
    }
}

/// Interview document as held by the persistence layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interview {
    pub id: InterviewId,
    pub title: String,
    pub interview_type: String,
    pub status: InterviewStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Identity of the admin who created it
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Interview {
    /// Materialize a new interview in its initial state
    pub fn scheduled(new: NewInterview, created_by: impl Into<String>) -> Self {
        Self {
            id: InterviewId::generate(),
            title: new.title,
            interview_type: new.interview_type,
            status: InterviewStatus::Scheduled,
            scheduled_at: new.scheduled_at,
            created_by: created_by.into(),
            created_at: Utc::now(),
        }
    }
}

/// Payload for creating an interview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInterview {
    pub title: String,
    pub interview_type: String,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl NewInterview {
    pub fn new(title: impl Into<String>, interview_type: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            interview_type: interview_type.into(),
            scheduled_at: None,
        }
    }

    pub fn with_scheduled_at(mut self, at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(at);
        self
    }
}

/// Optional filters on the interview collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewFilter {
    #[serde(default)]
    pub status: Option<InterviewStatus>,
    #[serde(default)]
    pub interview_type: Option<String>,
}

impl InterviewFilter {
    pub fn with_status(mut self, status: InterviewStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_type(mut self, interview_type: impl Into<String>) -> Self {
        self.interview_type = Some(interview_type.into());
        self
    }

    /// Whether an interview passes every filter that is set
    pub fn matches(&self, interview: &Interview) -> bool {
        self.status.map_or(true, |s| s == interview.status)
            && self
                .interview_type
                .as_deref()
                .map_or(true, |t| t == interview.interview_type)
    }
}
