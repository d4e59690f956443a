//! Interview lifecycle state machine
//!
//! Two independent layers decide whether a status change may happen:
//!
//! 1. The transition table ([`is_valid_transition`]), a pure function of the
//!    current and requested status.
//! 2. The role gate ([`role_may_trigger`]), consulted only once the table has
//!    accepted the edge.
//!
//! ```text
//! scheduled ──▶ ongoing ──▶ completed
//!     │
//!     └──────▶ cancelled
//! ```

use intervue_core::{InterviewStatus, Role};
use serde::{Deserialize, Serialize};

use crate::error::{AuthzError, Result};

use intervue_core::InterviewStatus::{Cancelled, Completed, Ongoing, Scheduled};

/// Directed edges of the lifecycle. Anything not listed is invalid.
const TRANSITIONS: &[(InterviewStatus, InterviewStatus)] = &[
    (Scheduled, Ongoing),
    (Scheduled, Cancelled),
    (Ongoing, Completed),
];

/// Edges an interviewer may drive
const INTERVIEWER_TRANSITIONS: &[(InterviewStatus, InterviewStatus)] = &[
    (Scheduled, Ongoing),
    (Ongoing, Completed),
];

/// Whether `current -> next` is an edge of the lifecycle
pub fn is_valid_transition(current: InterviewStatus, next: InterviewStatus) -> bool {
    TRANSITIONS.contains(&(current, next))
}

/// Statuses reachable in one step from `current`
pub fn next_states(current: InterviewStatus) -> Vec<InterviewStatus> {
    TRANSITIONS
        .iter()
        .filter(|(from, _)| *from == current)
        .map(|(_, to)| *to)
        .collect()
}

/// Whether `role` may trigger the table-valid edge `from -> to`
pub fn role_may_trigger(role: Role, from: InterviewStatus, to: InterviewStatus) -> bool {
    match role {
        Role::Admin => true,
        Role::Interviewer => INTERVIEWER_TRANSITIONS.contains(&(from, to)),
        Role::Candidate => false,
    }
}

/// Apply the table check, then the role gate
///
/// A table-invalid request fails with `InvalidTransition` whatever the role.
pub fn check_transition(role: Role, from: InterviewStatus, to: InterviewStatus) -> Result<()> {
    if !is_valid_transition(from, to) {
        return Err(AuthzError::InvalidTransition { from, to });
    }

    if !role_may_trigger(role, from, to) {
        let reason = match role {
            Role::Candidate => "candidates cannot change interview status".to_string(),
            _ => format!("{} may not move an interview from {} to {}", role, from, to),
        };
        return Err(AuthzError::PermissionDenied(reason));
    }

    Ok(())
}

/// A status change that was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: InterviewStatus,
    pub to: InterviewStatus,
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interview status changed from {} to {}", self.from, self.to)
    }
}
