//! Products domain module.
//!
//! This crate contains the product catalog and its business rules, implemented
//! as deterministic domain logic (no IO, no presentation).

pub mod catalog;
pub mod product;

pub use catalog::CatalogStore;
pub use product::{NewProduct, Product, ProductPatch};
