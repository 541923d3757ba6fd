use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ProductId};

/// A catalog product.
///
/// # Invariants
/// - `name` is non-empty after trimming.
/// - `price >= 0` and `stock_quantity >= 0`.
/// - `last_updated` is the instant of the most recent creation or mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    category: String,
    price: Decimal,
    stock_quantity: i64,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
}

impl Product {
    pub(crate) fn create(id: ProductId, new: NewProduct, now: DateTime<Utc>) -> DomainResult<Self> {
        new.validate()?;
        Ok(Self {
            id,
            name: new.name.trim().to_string(),
            category: new.category.trim().to_string(),
            price: new.price,
            stock_quantity: new.stock_quantity,
            created_at: now,
            last_updated: now,
        })
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn stock_quantity(&self) -> i64 {
        self.stock_quantity
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// At or below the restocking threshold.
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.stock_quantity <= threshold
    }

    /// Case-insensitive substring match on name or category.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }

    /// Apply a validated patch and stamp `last_updated`.
    pub(crate) fn apply(&mut self, patch: &ProductPatch, now: DateTime<Utc>) -> DomainResult<()> {
        patch.validate()?;

        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(category) = &patch.category {
            self.category = category.trim().to_string();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock_quantity) = patch.stock_quantity {
            self.stock_quantity = stock_quantity;
        }
        self.last_updated = now;
        Ok(())
    }
}

/// Input for adding a product to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock_quantity: i64,
}

impl NewProduct {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: Decimal,
        stock_quantity: i64,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            stock_quantity,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        validate_name(&self.name)?;
        validate_price(self.price)?;
        validate_stock(self.stock_quantity)
    }
}

/// Partial update: only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i64>,
}

impl ProductPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn stock_quantity(mut self, stock_quantity: i64) -> Self {
        self.stock_quantity = Some(stock_quantity);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.stock_quantity.is_none()
    }

    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(stock_quantity) = self.stock_quantity {
            validate_stock(stock_quantity)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::invalid_argument("name cannot be empty"));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> DomainResult<()> {
    if price < Decimal::ZERO {
        return Err(DomainError::invalid_argument("price cannot be negative"));
    }
    Ok(())
}

fn validate_stock(stock_quantity: i64) -> DomainResult<()> {
    if stock_quantity < 0 {
        return Err(DomainError::invalid_argument("stock quantity cannot be negative"));
    }
    Ok(())
}
