//! One-way salted password hashing (Argon2id, PHC string format).

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash as PhcHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use stockroom_core::{DomainError, DomainResult};

/// Hash verified against when the username is unknown, so that a failed
/// login costs one Argon2 verification whether or not the user exists.
static DECOY_HASH: LazyLock<Option<PasswordHash>> =
    LazyLock::new(|| PasswordHash::new("stockroom-decoy-password").ok());

/// Stored password verifier: an Argon2id PHC string (algorithm, params,
/// salt and digest in one self-describing value).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    phc: String,
}

impl PasswordHash {
    /// Hash `password` under a fresh random salt.
    pub fn new(password: &str) -> DomainResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| Self { phc: hash.to_string() })
            .map_err(|_| DomainError::invalid_argument("password could not be hashed"))
    }

    /// The encoded PHC string, e.g. `$argon2id$v=19$m=...`.
    pub fn as_phc(&self) -> &str {
        &self.phc
    }

    /// Check a candidate password against this hash.
    ///
    /// Digest comparison inside `argon2` is constant-time.
    pub fn verify(&self, password: &str) -> bool {
        let Ok(parsed) = PhcHash::new(&self.phc) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Spend the same work as `verify` without a stored hash.
    pub(crate) fn burn(password: &str) {
        if let Some(decoy) = DECOY_HASH.as_ref() {
            let _ = decoy.verify(password);
        }
    }
}

impl core::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PasswordHash")
            .field("phc", &"<redacted>")
            .finish()
    }
}
