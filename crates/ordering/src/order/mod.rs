//! Order aggregate and related types.

mod aggregate;
mod state;
mod value_objects;

pub use aggregate::Order;
pub use state::OrderStatus;
pub use value_objects::{CustomerId, OrderId, OrderItem, ProductId, Quantity, max_order_total};

use common::Money;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The order left Draft and can no longer be changed.
    #[error("Order {order_id} is already {status} and cannot be modified")]
    AlreadyConfirmed {
        order_id: OrderId,
        status: OrderStatus,
    },

    /// Confirmation attempted without any items.
    #[error("Order {0} has no items")]
    EmptyOrder(OrderId),

    /// Order ids must be positive.
    #[error("Invalid order id: {0} (must be greater than 0)")]
    InvalidOrderId(i64),

    /// Product ids must be positive.
    #[error("Invalid product id: {0} (must be greater than 0)")]
    InvalidProductId(i64),

    /// Customer id was empty or whitespace.
    #[error("Customer ID is required")]
    InvalidCustomerId,

    /// Quantities must be positive and fit in 32 bits.
    #[error("Invalid quantity: {0} (must be greater than 0)")]
    InvalidQuantity(i64),

    /// Merging two quantities overflowed.
    #[error("Quantity overflow")]
    QuantityOverflow,

    /// Unit prices must be positive.
    #[error("Invalid unit price: {0} (must be greater than 0)")]
    InvalidUnitPrice(Money),

    /// A line subtotal or the order total would exceed [`max_order_total`].
    #[error("Order amount exceeds the supported maximum of {}", max_order_total())]
    AmountOutOfRange,
}
