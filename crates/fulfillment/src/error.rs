//! Fulfillment error types.

use common::StoreError;
use ordering::{OrderError, OrderId, OrderStatus, ProductId};
use thiserror::Error;

/// Errors surfaced by the confirmation workflow and its collaborators.
///
/// None are retried or recovered internally; the first failure ends the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FulfillmentError {
    /// No order is stored under the id.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// No product is stored under the id.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The order is no longer a draft.
    #[error("Order {order_id} is already {status}")]
    OrderAlreadyConfirmed {
        order_id: OrderId,
        status: OrderStatus,
    },

    /// Confirmation attempted without any items.
    #[error("Order {0} has no items")]
    EmptyOrder(OrderId),

    /// The external system already knows this order.
    #[error("Order {0} already exists in the external system")]
    OrderAlreadyExists(OrderId),

    /// Not enough stock to cover a line.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Input failed validation.
    #[error("Invalid order data: {0}")]
    Validation(OrderError),

    /// A store rejected a write.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<OrderError> for FulfillmentError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::AlreadyConfirmed { order_id, status } => {
                FulfillmentError::OrderAlreadyConfirmed { order_id, status }
            }
            OrderError::EmptyOrder(order_id) => FulfillmentError::EmptyOrder(order_id),
            other => FulfillmentError::Validation(other),
        }
    }
}

impl FulfillmentError {
    /// Short label for the error kind, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            FulfillmentError::OrderNotFound(_) => "order_not_found",
            FulfillmentError::ProductNotFound(_) => "product_not_found",
            FulfillmentError::OrderAlreadyConfirmed { .. } => "order_already_confirmed",
            FulfillmentError::EmptyOrder(_) => "empty_order",
            FulfillmentError::OrderAlreadyExists(_) => "order_already_exists",
            FulfillmentError::InsufficientStock { .. } => "insufficient_stock",
            FulfillmentError::Validation(_) => "validation",
            FulfillmentError::Store(_) => "store",
        }
    }
}

/// Convenience type alias for fulfillment results.
pub type Result<T> = std::result::Result<T, FulfillmentError>;
