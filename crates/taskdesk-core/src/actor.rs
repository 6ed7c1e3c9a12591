//! # Actor Model
//!
//! The resolved identity attempting a workflow operation. Identity is
//! resolved once per call at the HTTP boundary (session cookies, or a
//! capability token's issuer) and passed down as an immutable value —
//! the engine itself never reads ambient session state.

use serde::{Deserialize, Serialize};

use crate::identity::Username;

/// The role an actor holds.
///
/// The original service modeled this as the presence or absence of an
/// admin session cookie; here it is a closed enum so authorization
/// predicates can match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A regular employee account.
    User,
    /// An administrator account.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

/// The party requesting a transition: a username plus its role.
///
/// Never persisted by the workflow engine; it exists only for the
/// duration of one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The authenticated username.
    pub username: Username,
    /// The role resolved for this session.
    pub role: Role,
}

impl Actor {
    /// Construct an actor.
    pub fn new(username: Username, role: Role) -> Self {
        Self { username, role }
    }

    /// Whether this actor holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, role: Role) -> Actor {
        Actor::new(Username::new(name).unwrap(), role)
    }

    #[test]
    fn test_is_admin() {
        assert!(user("carol", Role::Admin).is_admin());
        assert!(!user("alice", Role::User).is_admin());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        let r: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(r, Role::Admin);
    }
}
