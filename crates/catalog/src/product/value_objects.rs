//! Value objects for the catalog.

use common::Money;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Unique identifier for a product in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Creates a product id, rejecting zero and negative values.
    pub fn new(value: i64) -> Result<Self, CatalogError> {
        if value <= 0 {
            return Err(CatalogError::InvalidProductId(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Longest product name accepted, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Display name of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductName(String);

impl ProductName {
    /// Creates a product name, trimming surrounding whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, CatalogError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.chars().count() > MAX_PRODUCT_NAME_LEN {
            return Err(CatalogError::InvalidProductName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// List price of a product. Zero is allowed, negative amounts are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Money);

impl Price {
    pub fn new(amount: Money) -> Result<Self, CatalogError> {
        if amount.is_negative() {
            return Err(CatalogError::NegativePrice(amount));
        }
        Ok(Self(amount))
    }

    pub fn amount(&self) -> Money {
        self.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
