//! Inventory facade.
//!
//! Composes the credential store, product catalog and session guard into the
//! single API consumed by front-ends. Front-ends hold no business logic.

pub mod config;
pub mod system;


pub use config::{InventoryConfig, ReadAccess, DEFAULT_LOW_STOCK_THRESHOLD};
pub use system::InventorySystem;

pub use rust_decimal::Decimal;
pub use stockroom_auth::{Principal, Role};
pub use stockroom_core::{DomainError, DomainResult, ProductId};
pub use stockroom_products::{NewProduct, Product, ProductPatch};
