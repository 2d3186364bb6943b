//! Confirmation pricing: tax and shipping.

use chrono::{DateTime, Utc};
use common::Money;
use rust_decimal::Decimal;

use crate::{Order, OrderConfirmation};

/// How shipping is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShippingPolicy {
    /// Free at or above `threshold`, otherwise `base + per_item × total quantity`.
    FreeAboveThreshold {
        threshold: Money,
        base: Money,
        per_item: Money,
    },
    /// The same fee for every order.
    Flat(Money),
}

impl ShippingPolicy {
    /// Returns the shipping charge for the given subtotal and unit count.
    pub fn charge(&self, subtotal: Money, total_item_count: u64) -> Money {
        match *self {
            ShippingPolicy::FreeAboveThreshold {
                threshold,
                base,
                per_item,
            } => {
                if subtotal >= threshold {
                    Money::zero()
                } else {
                    base + per_item.multiply_by(Decimal::from(total_item_count))
                }
            }
            ShippingPolicy::Flat(fee) => fee,
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        ShippingPolicy::FreeAboveThreshold {
            threshold: Money::of(Decimal::new(10000, 2)),
            base: Money::of(Decimal::new(599, 2)),
            per_item: Money::of(Decimal::new(100, 2)),
        }
    }
}

/// Tax rate and shipping policy used to price a confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingConfig {
    /// Fraction of the subtotal charged as tax (0.19 = 19%).
    pub tax_rate: Decimal,
    pub shipping: ShippingPolicy,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(19, 2),
            shipping: ShippingPolicy::default(),
        }
    }
}

/// Prices an order into an unpersisted [`OrderConfirmation`].
///
/// Pure apart from reading the clock in [`ConfirmationCalculator::calculate`];
/// the same order state always yields the same amounts.
#[derive(Debug, Clone, Default)]
pub struct ConfirmationCalculator {
    config: PricingConfig,
}

impl ConfirmationCalculator {
    /// Creates a calculator for the given pricing.
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Returns the pricing in use.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Prices the order, stamping it with the current time.
    pub fn calculate(&self, order: &Order) -> OrderConfirmation {
        self.calculate_at(order, Utc::now())
    }

    /// Prices the order with an explicit confirmation time.
    pub fn calculate_at(&self, order: &Order, confirmed_at: DateTime<Utc>) -> OrderConfirmation {
        let subtotal = order.calculate_total();
        let tax = subtotal.multiply_by(self.config.tax_rate);
        let shipping = self
            .config
            .shipping
            .charge(subtotal, order.total_item_count());

        OrderConfirmation::new(order.order_id(), subtotal, tax, shipping, confirmed_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CustomerId, OrderId, ProductId, Quantity};
    use rust_decimal_macros::dec;

    fn order_with(lines: &[(i64, i64, Decimal)]) -> Order {
        let mut order = Order::create(OrderId::new(1).unwrap(), CustomerId::new("C").unwrap());
        for &(product, quantity, price) in lines {
            order
                .add_item(
                    ProductId::new(product).unwrap(),
                    Quantity::new(quantity).unwrap(),
                    Money::of(price),
                )
                .unwrap();
        }
        order
    }

    #[test]
    fn test_large_order_ships_free() {
        let order = order_with(&[(1, 2, dec!(999.99)), (2, 1, dec!(79.99))]);
        let confirmation = ConfirmationCalculator::default().calculate(&order);

        assert_eq!(confirmation.total_amount().amount(), dec!(2079.97));
        assert_eq!(confirmation.tax_amount().amount(), dec!(395.19));
        assert_eq!(confirmation.shipping_cost(), Money::zero());
        assert_eq!(confirmation.grand_total().amount(), dec!(2475.16));
    }

    #[test]
    fn test_small_order_pays_base_plus_per_item() {
        let order = order_with(&[(3, 1, dec!(10.00))]);
        let confirmation = ConfirmationCalculator::default().calculate(&order);

        assert_eq!(confirmation.total_amount().amount(), dec!(10.00));
        assert_eq!(confirmation.tax_amount().amount(), dec!(1.90));
        assert_eq!(confirmation.shipping_cost().amount(), dec!(6.99));
        assert_eq!(confirmation.grand_total().amount(), dec!(18.89));
    }

    #[test]
    fn test_per_item_shipping_counts_units_not_lines() {
        let order = order_with(&[(1, 3, dec!(5.00)), (2, 2, dec!(1.00))]);
        let shipping = ConfirmationCalculator::default()
            .calculate(&order)
            .shipping_cost();
        assert_eq!(shipping.amount(), dec!(10.99));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let order = order_with(&[(1, 1, dec!(100.00))]);
        let shipping = ConfirmationCalculator::default()
            .calculate(&order)
            .shipping_cost();
        assert_eq!(shipping, Money::zero());
    }

    #[test]
    fn test_flat_policy_ignores_subtotal() {
        let calculator = ConfirmationCalculator::new(PricingConfig {
            tax_rate: dec!(0.19),
            shipping: ShippingPolicy::Flat(Money::of(dec!(5.99))),
        });
        let large = order_with(&[(1, 2, dec!(999.99))]);
        assert_eq!(
            calculator.calculate(&large).shipping_cost().amount(),
            dec!(5.99)
        );
    }

    #[test]
    fn test_largest_order_prices_without_overflow() {
        let order = order_with(&[(1, 1, crate::max_order_total().amount())]);
        let confirmation = ConfirmationCalculator::default().calculate(&order);

        assert_eq!(confirmation.tax_amount().amount(), dec!(190000000000.00));
        assert_eq!(confirmation.shipping_cost(), Money::zero());
        assert_eq!(confirmation.grand_total().amount(), dec!(1189999999999.99));
    }

    #[test]
    fn test_calculation_is_repeatable() {
        let order = order_with(&[(1, 1, dec!(33.33)), (2, 7, dec!(0.99))]);
        let calculator = ConfirmationCalculator::default();
        let first = calculator.calculate(&order);
        let second = calculator.calculate(&order);

        assert_eq!(first.total_amount(), second.total_amount());
        assert_eq!(first.tax_amount(), second.tax_amount());
        assert_eq!(first.shipping_cost(), second.shipping_cost());
        assert_eq!(first.grand_total(), second.grand_total());
    }

    #[test]
    fn test_calculate_at_uses_given_time() {
        let at = Utc::now() - chrono::Duration::hours(1);
        let order = order_with(&[(1, 1, dec!(1.00))]);
        let confirmation = ConfirmationCalculator::default().calculate_at(&order, at);
        assert_eq!(confirmation.confirmed_at(), at);
        assert_eq!(confirmation.order_id(), order.order_id());
    }
}
