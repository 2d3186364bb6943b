//! Catalog error types.

use common::{Money, StoreError};
use thiserror::Error;

use crate::product::ProductId;

/// Errors that can occur in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No product is stored under the id.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The product does not hold enough stock for the request.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Product ids must be positive.
    #[error("Invalid product id: {0} (must be greater than 0)")]
    InvalidProductId(i64),

    /// Product names must not be blank or longer than 200 characters.
    #[error("Product name must be between 1 and 200 characters")]
    InvalidProductName,

    /// Prices cannot be negative.
    #[error("Invalid price: {0} (must not be negative)")]
    NegativePrice(Money),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
