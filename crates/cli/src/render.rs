//! Plain-text rendering of catalog records and errors.

use stockroom_inventory::{DomainError, Product};

use crate::menu::ActionError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Full listing line.
pub fn product_line(product: &Product) -> String {
    format!(
        "ID: {}, Name: {}, Category: {}, Price: ${:.2}, Stock: {}, Last Updated: {}",
        product.id(),
        product.name(),
        product.category(),
        product.price(),
        product.stock_quantity(),
        product.last_updated().format(TIMESTAMP_FORMAT),
    )
}

/// Search result line.
pub fn search_line(product: &Product) -> String {
    format!(
        "ID: {}, Name: {}, Category: {}, Stock: {}",
        product.id(),
        product.name(),
        product.category(),
        product.stock_quantity(),
    )
}

/// Low-stock report line.
pub fn low_stock_line(product: &Product) -> String {
    format!(
        "ID: {}, Name: {}, Stock: {}",
        product.id(),
        product.name(),
        product.stock_quantity(),
    )
}

/// User-facing message for a failed action.
pub fn error_message(err: &ActionError) -> String {
    match err {
        ActionError::Input(msg) => format!("Invalid input: {msg}"),
        ActionError::Domain(DomainError::InvalidArgument(msg)) => format!("Invalid input: {msg}"),
        ActionError::Domain(err @ DomainError::NotFound(_)) => format!("Invalid input: {err}"),
        ActionError::Domain(DomainError::PermissionDenied(msg)) => {
            format!("Permission denied: {msg}")
        }
        ActionError::Domain(DomainError::InvalidCredentials) => "Invalid credentials!".to_string(),
        other => format!("Error: {other}"),
    }
}
