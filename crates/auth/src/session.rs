//! Single-identity session state machine.
//!
//! `Anonymous --login ok--> Authenticated(p) --logout--> Anonymous`.
//! A successful login replaces any current identity; a failed one leaves the
//! session as it was.

use stockroom_core::DomainResult;

use crate::{CredentialStore, Principal};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(Principal),
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticate against `store` and become that user.
    pub fn login(
        &mut self,
        store: &CredentialStore,
        username: &str,
        password: &str,
    ) -> DomainResult<Principal> {
        let principal = Principal::from(store.authenticate(username, password)?);
        *self = Session::Authenticated(principal.clone());
        Ok(principal)
    }

    /// Drop the current identity, returning it if there was one.
    pub fn logout(&mut self) -> Option<Principal> {
        match std::mem::take(self) {
            Session::Authenticated(principal) => Some(principal),
            Session::Anonymous => None,
        }
    }

    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Session::Authenticated(principal) => Some(principal),
            Session::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn is_admin(&self) -> bool {
        self.principal().is_some_and(Principal::is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockroom_core::DomainError;

    use crate::Role;

    fn store() -> CredentialStore {
        CredentialStore::with_default_accounts(Utc::now()).unwrap()
    }

    #[test]
    fn starts_anonymous() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert!(session.principal().is_none());
    }

    #[test]
    fn login_with_valid_credentials_authenticates() {
        let store = store();
        let mut session = Session::new();

        let principal = session.login(&store, "admin", "admin123").unwrap();
        assert_eq!(principal.username, "admin");
        assert_eq!(principal.role, Role::Admin);
        assert!(session.is_admin());
    }

    #[test]
    fn failed_login_keeps_previous_state() {
        let store = store();
        let mut session = Session::new();

        assert_eq!(
            session.login(&store, "admin", "wrong").unwrap_err(),
            DomainError::InvalidCredentials
        );
        assert_eq!(session, Session::Anonymous);

        session.login(&store, "user", "user123").unwrap();
        let _ = session.login(&store, "admin", "wrong");
        assert_eq!(session.principal().unwrap().username, "user");
    }

    #[test]
    fn login_replaces_existing_identity_without_logout() {
        let store = store();
        let mut session = Session::new();

        session.login(&store, "user", "user123").unwrap();
        assert!(!session.is_admin());

        session.login(&store, "admin", "admin123").unwrap();
        assert!(session.is_admin());
        assert_eq!(session.principal().unwrap().username, "admin");
    }

    #[test]
    fn logout_is_unconditional() {
        let store = store();
        let mut session = Session::new();

        assert!(session.logout().is_none());

        session.login(&store, "user", "user123").unwrap();
        let previous = session.logout().unwrap();
        assert_eq!(previous.username, "user");
        assert!(!session.is_authenticated());
    }
}
