//! Product aggregate implementation.

use common::{Aggregate, Version};

use super::{Price, ProductId, ProductName};
use crate::error::CatalogError;

const UNKNOWN_MANUFACTURER: &str = "Unknown";

/// Product aggregate root.
///
/// Owns its stock counter. Reservations never drive stock below zero and
/// leave it untouched when they fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: ProductName,
    description: Option<String>,
    manufacturer: String,
    price: Price,
    stock_quantity: u32,
    available: bool,
    version: Version,
}

impl Aggregate for Product {
    type Id = ProductId;

    fn aggregate_type() -> &'static str {
        "Product"
    }

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}

impl Product {
    /// Creates an available product with no stock.
    pub fn create(id: ProductId, name: ProductName, price: Price) -> Self {
        Self {
            id,
            name,
            description: None,
            manufacturer: UNKNOWN_MANUFACTURER.to_string(),
            price,
            stock_quantity: 0,
            available: true,
            version: Version::initial(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    pub fn with_stock(mut self, quantity: u32) -> Self {
        self.stock_quantity = quantity;
        self
    }

    /// Marks the product as delisted.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn product_id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &ProductName {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn stock_quantity(&self) -> u32 {
        self.stock_quantity
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Returns true if the stock covers the requested quantity.
    pub fn has_enough_stock(&self, requested: u32) -> bool {
        self.stock_quantity >= requested
    }

    /// Takes `quantity` units out of stock.
    pub fn reserve_stock(&mut self, quantity: u32) -> Result<(), CatalogError> {
        if !self.has_enough_stock(quantity) {
            return Err(CatalogError::InsufficientStock {
                product_id: self.id,
                requested: quantity,
                available: self.stock_quantity,
            });
        }
        self.stock_quantity -= quantity;
        Ok(())
    }

    /// Puts `quantity` units back into stock.
    ///
    /// There is no upper bound; the counter saturates at `u32::MAX`.
    pub fn release_stock(&mut self, quantity: u32) {
        self.stock_quantity = self.stock_quantity.saturating_add(quantity);
    }
}
