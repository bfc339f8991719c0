//! Caller roles for the portal

use serde::{Deserialize, Serialize};

/// The role of an authenticated portal user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Editorial administrator: assigns reviewers, publishes, archives
    Admin,
    /// Professor: reviews manuscripts assigned to them
    Professor,
    /// Public user: submits manuscripts and browses listings
    User,
}

impl Role {
    /// Check if this role carries editorial administration rights
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Check if this role may record review decisions
    pub fn can_review(&self) -> bool {
        matches!(self, Role::Admin | Role::Professor)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Professor => write!(f, "professor"),
            Role::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "professor" => Ok(Role::Professor),
            "user" => Ok(Role::User),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}
