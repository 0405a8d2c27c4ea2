//! Roles carried in token claims.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A role name as the backend spells it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Store administrator (`ADMIN` or `ROLE_ADMIN`).
    Admin,
    /// Regular customer (`USER` or `ROLE_USER`).
    User,
    /// Any other authority.
    Other(String),
}

impl Role {
    /// Get role as the backend's canonical string.
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
            Role::Other(s) => s,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "ADMIN" | "ROLE_ADMIN" => Role::Admin,
            "USER" | "ROLE_USER" => Role::User,
            other => Role::Other(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_spellings() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("ROLE_ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("ROLE_USER".parse::<Role>().unwrap(), Role::User);
        assert!(!"admin".parse::<Role>().unwrap().is_admin());
    }
}
