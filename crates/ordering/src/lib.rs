//! Order bounded context.
//!
//! This crate provides:
//! - Order aggregate with a Draft → Confirmed / Cancelled state machine
//! - Value objects for ids, quantities, and order lines
//! - The confirmation record and the pure calculator that prices it

pub mod calculator;
pub mod confirmation;
pub mod order;

pub use calculator::{ConfirmationCalculator, PricingConfig, ShippingPolicy};
pub use common::Money;
pub use confirmation::{ConfirmationId, OrderConfirmation};
pub use order::{
    CustomerId, Order, OrderError, OrderId, OrderItem, OrderStatus, ProductId, Quantity,
    max_order_total,
};
