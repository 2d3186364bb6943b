//! Order confirmation record.

use chrono::{DateTime, Utc};
use common::Money;
use serde::{Deserialize, Serialize};

use crate::OrderId;

/// Sequence number assigned to a confirmation when it is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmationId(u64);

impl ConfirmationId {
    /// Creates a confirmation id from a raw sequence value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw sequence value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ConfirmationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The priced result of confirming an order.
///
/// Immutable once built. References the order by id only. The id is
/// `None` until a confirmation store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    id: Option<ConfirmationId>,
    order_id: OrderId,
    total_amount: Money,
    tax_amount: Money,
    shipping_cost: Money,
    grand_total: Money,
    confirmed_at: DateTime<Utc>,
}

impl OrderConfirmation {
    /// Creates an unpersisted confirmation. The grand total is derived.
    pub fn new(
        order_id: OrderId,
        total_amount: Money,
        tax_amount: Money,
        shipping_cost: Money,
        confirmed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            order_id,
            total_amount,
            tax_amount,
            shipping_cost,
            grand_total: total_amount + tax_amount + shipping_cost,
            confirmed_at,
        }
    }

    /// Returns the same confirmation carrying the id assigned at persistence time.
    pub fn with_id(self, id: ConfirmationId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    /// Returns the persisted id, if any.
    pub fn id(&self) -> Option<ConfirmationId> {
        self.id
    }

    /// Returns the confirmed order's id.
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Returns the order subtotal.
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Returns the tax charged on the subtotal.
    pub fn tax_amount(&self) -> Money {
        self.tax_amount
    }

    /// Returns the shipping charge.
    pub fn shipping_cost(&self) -> Money {
        self.shipping_cost
    }

    /// Returns subtotal + tax + shipping.
    pub fn grand_total(&self) -> Money {
        self.grand_total
    }

    /// Returns when the confirmation was computed.
    pub fn confirmed_at(&self) -> DateTime<Utc> {
        self.confirmed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_grand_total_sums_components() {
        let confirmation = OrderConfirmation::new(
            OrderId::new(1).unwrap(),
            Money::of(dec!(10.00)),
            Money::of(dec!(1.90)),
            Money::of(dec!(6.99)),
            Utc::now(),
        );
        assert_eq!(confirmation.grand_total().amount(), dec!(18.89));
        assert!(confirmation.id().is_none());
    }

    #[test]
    fn test_with_id_keeps_other_fields() {
        let at = Utc::now();
        let confirmation = OrderConfirmation::new(
            OrderId::new(7).unwrap(),
            Money::of(dec!(1)),
            Money::of(dec!(2)),
            Money::of(dec!(3)),
            at,
        );
        let persisted = confirmation.clone().with_id(ConfirmationId::new(4));

        assert_eq!(persisted.id(), Some(ConfirmationId::new(4)));
        assert_eq!(persisted.order_id(), confirmation.order_id());
        assert_eq!(persisted.grand_total(), confirmation.grand_total());
        assert_eq!(persisted.confirmed_at(), at);
    }

    #[test]
    fn test_serializes_amounts_as_strings() {
        let confirmation = OrderConfirmation::new(
            OrderId::new(2).unwrap(),
            Money::of(dec!(10)),
            Money::of(dec!(1.9)),
            Money::of(dec!(6.99)),
            Utc::now(),
        )
        .with_id(ConfirmationId::new(1));

        let json = serde_json::to_value(&confirmation).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["order_id"], 2);
        assert_eq!(json["grand_total"], "18.89");

        let back: OrderConfirmation = serde_json::from_value(json).unwrap();
        assert_eq!(back, confirmation);
    }
}
