use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockroom_core::DomainError;

use crate::Permission;

/// Role identifier used for RBAC.
///
/// The inventory system knows exactly two roles. Mapping roles to permissions
/// lives here so every guard asks the same question.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }

    /// Permissions granted by this role.
    pub fn permissions(&self) -> Vec<Permission> {
        match self {
            Role::Admin => vec![Permission::WILDCARD],
            Role::User => vec![Permission::CATALOG_READ],
        }
    }

    /// Whether this role grants `required` (directly or via wildcard).
    pub fn grants(&self, required: &Permission) -> bool {
        self.permissions()
            .iter()
            .any(|p| p.is_wildcard() || p == required)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(DomainError::invalid_argument(format!("unknown role '{other}'"))),
        }
    }
}
