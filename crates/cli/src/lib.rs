//! `stockroom-cli`: console front-end for the inventory facade.

pub mod menu;
pub mod render;

pub use menu::{ActionError, Menu};
