use stockroom_core::{DomainError, DomainResult};

use crate::{Permission, Principal, Session};

/// Authorize the current session for `required`.
///
/// - No IO
/// - No panics
/// - Anonymous sessions are never authorized
pub fn authorize<'s>(session: &'s Session, required: &Permission) -> DomainResult<&'s Principal> {
    let principal = session.principal().ok_or_else(|| {
        DomainError::permission_denied(format!("login required for '{required}'"))
    })?;

    if principal.role.grants(required) {
        Ok(principal)
    } else {
        Err(DomainError::permission_denied(format!(
            "role '{}' is missing permission '{}'",
            principal.role, required
        )))
    }
}
