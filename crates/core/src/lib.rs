//! `stockroom-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no presentation).

pub mod clock;
pub mod error;
pub mod id;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{DomainError, DomainResult};
pub use id::{ProductId, UserId};
