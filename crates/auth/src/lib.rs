//! `stockroom-auth`: credentials, sessions and role-based authorization.
//!
//! This crate is intentionally decoupled from presentation and storage.

pub mod authorize;
pub mod credentials;
pub mod password;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod session;
pub mod user;

pub use authorize::authorize;
pub use credentials::{CredentialStore, DEFAULT_ACCOUNTS};
pub use password::PasswordHash;
pub use permissions::Permission;
pub use principal::Principal;
pub use roles::Role;
pub use session::Session;
pub use user::UserRecord;
