use serde::Serialize;

use stockroom_core::UserId;

use crate::{Role, UserRecord};

/// Snapshot of an authenticated identity.
///
/// Held by the session; the credential store keeps owning the record itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&UserRecord> for Principal {
    fn from(record: &UserRecord) -> Self {
        Self {
            user_id: record.user_id(),
            username: record.username().to_string(),
            role: record.role(),
        }
    }
}
