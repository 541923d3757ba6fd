//! Registered user accounts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockroom_core::UserId;

use crate::{PasswordHash, Role};

/// A registered account.
///
/// # Invariants
/// - `username` is the unique, immutable key within a credential store.
/// - Records are never mutated after registration.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    id: UserId,
    username: String,
    #[serde(skip)]
    password: PasswordHash,
    role: Role,
    created_at: DateTime<Utc>,
}

impl UserRecord {
    pub(crate) fn new(
        username: String,
        password: PasswordHash,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            username,
            password,
            role,
            created_at,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn check_password(&self, password: &str) -> bool {
        self.password.verify(password)
    }
}
