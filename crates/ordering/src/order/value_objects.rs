//! Value objects for the order domain.

use common::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrderError;

/// Unique identifier for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Creates an order id, rejecting zero and negative values.
    pub fn new(value: i64) -> Result<Self, OrderError> {
        if value <= 0 {
            return Err(OrderError::InvalidOrderId(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw id.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for OrderId {
    type Error = OrderError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Product identifier as seen from the order side.
///
/// Orders reference products by id only; nothing here depends on the
/// catalog's own product model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Creates a product id, rejecting zero and negative values.
    pub fn new(value: i64) -> Result<Self, OrderError> {
        if value <= 0 {
            return Err(OrderError::InvalidProductId(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw id.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for ProductId {
    type Error = OrderError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Identifier of the customer who owns an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Creates a customer id; blank input is rejected.
    pub fn new(id: impl Into<String>) -> Result<Self, OrderError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(OrderError::InvalidCustomerId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the customer id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A strictly positive number of units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Creates a quantity, rejecting zero, negative, and out-of-range values.
    pub fn new(value: i64) -> Result<Self, OrderError> {
        match u32::try_from(value) {
            Ok(v) if v > 0 => Ok(Self(v)),
            _ => Err(OrderError::InvalidQuantity(value)),
        }
    }

    /// Returns the raw quantity.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Adds two quantities.
    pub fn checked_add(&self, other: Quantity) -> Result<Quantity, OrderError> {
        self.0
            .checked_add(other.0)
            .map(Quantity)
            .ok_or(OrderError::QuantityOverflow)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Largest allowed line subtotal or order total: 999 999 999 999.99.
///
/// Kept well below the `Money` bound so tax and shipping on top of it
/// still fit.
pub fn max_order_total() -> Money {
    Money::of(Decimal::new(99_999_999_999_999, 2))
}

/// A line in an order: a product, how many, and at what unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    product_id: ProductId,
    quantity: Quantity,
    unit_price: Money,
}

impl OrderItem {
    /// Creates an order line.
    ///
    /// The unit price must be positive and the subtotal may not exceed
    /// [`max_order_total`].
    pub fn new(
        product_id: ProductId,
        quantity: Quantity,
        unit_price: Money,
    ) -> Result<Self, OrderError> {
        if !unit_price.is_positive() {
            return Err(OrderError::InvalidUnitPrice(unit_price));
        }
        match unit_price.checked_multiply(i64::from(quantity.value())) {
            Some(subtotal) if subtotal <= max_order_total() => {}
            _ => return Err(OrderError::AmountOutOfRange),
        }
        Ok(Self {
            product_id,
            quantity,
            unit_price,
        })
    }

    /// Returns the product this line refers to.
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Returns the ordered quantity.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Returns the unit price.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Returns unit_price × quantity, rounded as money.
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply(i64::from(self.quantity.value()))
    }
}
