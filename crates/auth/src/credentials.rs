//! Credential store: username -> hashed password + role.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use stockroom_core::{DomainError, DomainResult};

use crate::{PasswordHash, Role, UserRecord};

/// Accounts seeded into a fresh system.
///
/// These are documented defaults for demos and first login, not a security
/// posture; production deployments disable seeding.
pub const DEFAULT_ACCOUNTS: [(&str, &str, Role); 2] = [
    ("admin", "admin123", Role::Admin),
    ("user", "user123", Role::User),
];

/// In-memory credential store.
///
/// Owns every [`UserRecord`]; sessions only keep a snapshot of the principal.
#[derive(Debug, Default)]
pub struct CredentialStore {
    users: HashMap<String, UserRecord>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with [`DEFAULT_ACCOUNTS`].
    pub fn with_default_accounts(now: DateTime<Utc>) -> DomainResult<Self> {
        let mut store = Self::new();
        store.seed_default_accounts(now)?;
        Ok(store)
    }

    /// Register the default accounts.
    pub fn seed_default_accounts(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        for (username, password, role) in DEFAULT_ACCOUNTS {
            self.register(username, password, role, now)?;
        }
        Ok(())
    }

    /// Register a new account.
    ///
    /// Fails with `DuplicateUsername` (store unchanged) if the name is taken.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> DomainResult<&UserRecord> {
        let username = normalize_username(username);
        if username.is_empty() {
            return Err(DomainError::invalid_argument("username cannot be empty"));
        }
        if self.users.contains_key(username) {
            return Err(DomainError::duplicate_username(username));
        }

        let record = UserRecord::new(username.to_string(), PasswordHash::new(password)?, role, now);
        tracing::debug!(username, role = %role, "user registered");
        let record: &UserRecord = self.users.entry(username.to_string()).or_insert(record);
        Ok(record)
    }

    /// True iff `username` exists and `password` matches its stored hash.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.authenticate(username, password).is_ok()
    }

    /// Resolve the account for a username/password pair.
    ///
    /// Unknown users and wrong passwords both yield `InvalidCredentials`, and
    /// both cost one hash verification.
    pub fn authenticate(&self, username: &str, password: &str) -> DomainResult<&UserRecord> {
        match self.get(username) {
            Some(record) if record.check_password(password) => Ok(record),
            Some(_) => Err(DomainError::InvalidCredentials),
            None => {
                PasswordHash::burn(password);
                Err(DomainError::InvalidCredentials)
            }
        }
    }

    pub fn get(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(normalize_username(username))
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(normalize_username(username))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Registered usernames, sorted.
    pub fn usernames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.users.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Canonical key for a username. Every lookup and insert goes through here.
fn normalize_username(username: &str) -> &str {
    username.trim()
}
