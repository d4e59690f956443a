//! Authenticated caller identity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Platform role carried by an authenticated principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access, bypasses participant checks
    Admin,
    /// Runs interviews they participate in
    Interviewer,
    /// Attends interviews they participate in
    Candidate,
}

impl Role {
    /// All roles, in declaration order
    pub const ALL: [Role; 3] = [Role::Admin, Role::Interviewer, Role::Candidate];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Interviewer => "interviewer",
            Role::Candidate => "candidate",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "interviewer" => Ok(Role::Interviewer),
            "candidate" => Ok(Role::Candidate),
            other => Err(CoreError::InvalidRole(other.to_string())),
        }
    }
}

/// An authenticated caller (identity + role)
///
/// Produced upstream by whatever verified the caller's credential. This crate
/// never persists it; it lives for the duration of a single operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    /// Opaque identity, typically an email address
    pub identity: String,

    /// Role granted to this identity
    pub role: Role,
}

impl Principal {
    /// Create a new principal
    pub fn new(identity: impl Into<String>, role: Role) -> Self {
        Self {
            identity: identity.into(),
            role,
        }
    }

    /// Create an admin principal
    pub fn admin(identity: impl Into<String>) -> Self {
        Self::new(identity, Role::Admin)
    }

    /// Create an interviewer principal
    pub fn interviewer(identity: impl Into<String>) -> Self {
        Self::new(identity, Role::Interviewer)
    }

    /// Create a candidate principal
    pub fn candidate(identity: impl Into<String>) -> Self {
        Self::new(identity, Role::Candidate)
    }

    /// Resolve a principal from the wire pair produced by authentication
    pub fn from_wire(identity: impl Into<String>, role: &str) -> Result<Self, CoreError> {
        Ok(Self::new(identity, role.parse()?))
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_wire_string() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert_eq!(
            "Admin".parse::<Role>(),
            Err(CoreError::InvalidRole("Admin".to_string()))
        );
        assert!("candidates".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_principal_from_wire() {
        let principal = Principal::from_wire("alice@example.com", "interviewer").unwrap();
        assert_eq!(principal.role, Role::Interviewer);
        assert!(!principal.is_admin());

        assert!(Principal::from_wire("bob@example.com", "root").is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&Role::Candidate).unwrap();
        assert_eq!(json, "\"candidate\"");

        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
