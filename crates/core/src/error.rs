//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every operation of the inventory core reports failure through one of these
/// kinds. Presentation layers decide how to render them; the core never
/// retries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A user with this name is already registered.
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    /// Unknown username or wrong password (deliberately indistinguishable).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The active session may not perform the requested operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// A referenced resource does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// An input value failed validation (negative price, empty name, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl DomainError {
    pub fn duplicate_username(username: impl Into<String>) -> Self {
        Self::DuplicateUsername(username.into())
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Stable, machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::DuplicateUsername(_) => "duplicate_username",
            DomainError::InvalidCredentials => "invalid_credentials",
            DomainError::PermissionDenied(_) => "permission_denied",
            DomainError::NotFound(_) => "not_found",
            DomainError::InvalidArgument(_) => "invalid_argument",
        }
    }
}
