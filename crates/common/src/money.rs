//! Fixed-point money amounts.

use std::iter::Sum;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of fractional digits every amount is normalized to.
pub const MONEY_SCALE: u32 = 2;

/// Largest representable amount in cents: 9 999 999 999 999 999.99.
///
/// Sixteen integer digits keep every sum of two amounts and every rescale to
/// two places inside `Decimal`'s 96-bit mantissa.
const MAX_CENTS: i64 = 999_999_999_999_999_999;

/// A monetary amount with exactly two fractional digits.
///
/// Every constructor and every arithmetic result is rounded half-up
/// (midpoint away from zero) to two places, so no value ever carries more
/// precision than a cent. Magnitudes are bounded by [`Money::max_value`]:
/// the plain constructors and operators saturate at the bound, the
/// `checked_*` variants return `None` instead. Sign is not validated here;
/// callers that forbid negative amounts check it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Creates a normalized amount from a decimal, saturating at the bound.
    pub fn of(amount: Decimal) -> Self {
        let bound = max_amount();
        Self(normalize(round(amount).clamp(-bound, bound)))
    }

    /// Creates a normalized amount, or None if it lies outside the bound.
    pub fn checked_of(amount: Decimal) -> Option<Self> {
        let rounded = round(amount);
        (rounded.abs() <= max_amount()).then(|| Self(normalize(rounded)))
    }

    /// Returns the largest representable amount.
    pub fn max_value() -> Self {
        Self(max_amount())
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self::of(Decimal::ZERO)
    }

    /// Returns the underlying decimal amount (always scale 2).
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is below zero.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Adds another amount.
    pub fn add(&self, other: Money) -> Money {
        Money::of(self.0 + other.0)
    }

    /// Subtracts another amount.
    pub fn subtract(&self, other: Money) -> Money {
        Money::of(self.0 - other.0)
    }

    /// Multiplies by an integer factor, e.g. a quantity.
    pub fn multiply(&self, factor: i64) -> Money {
        self.multiply_by(Decimal::from(factor))
    }

    /// Multiplies by a fractional factor, e.g. a tax rate.
    pub fn multiply_by(&self, factor: Decimal) -> Money {
        match self.0.checked_mul(factor) {
            Some(product) => Money::of(product),
            None if self.is_negative() != factor.is_sign_negative() => -Money::max_value(),
            None => Money::max_value(),
        }
    }

    /// Adds another amount, or None if the sum leaves the bound.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        Money::checked_of(self.0 + other.0)
    }

    /// Multiplies by an integer factor, or None if the product leaves the bound.
    pub fn checked_multiply(&self, factor: i64) -> Option<Money> {
        self.0
            .checked_mul(Decimal::from(factor))
            .and_then(Money::checked_of)
    }
}

fn max_amount() -> Decimal {
    Decimal::new(MAX_CENTS, MONEY_SCALE)
}

fn round(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

// Only called on amounts within the bound, where rescaling cannot lose digits.
fn normalize(mut amount: Decimal) -> Decimal {
    amount.rescale(MONEY_SCALE);
    amount
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self::of(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

/// Error returned when a string is not a usable money amount.
#[derive(Debug, Error)]
pub enum MoneyParseError {
    #[error("invalid money amount {input:?}: {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("money amount {0:?} is out of range")]
    OutOfRange(String),
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim()).map_err(|source| MoneyParseError::Invalid {
            input: s.to_string(),
            source,
        })?;
        Money::checked_of(amount).ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money::of(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money::of(self.0 - rhs.0)
    }
}

impl std::ops::Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn of_rounds_half_up_to_two_places() {
        assert_eq!(Money::of(dec!(1.005)).amount(), dec!(1.01));
        assert_eq!(Money::of(dec!(1.004)).amount(), dec!(1.00));
        assert_eq!(Money::of(dec!(2.675)).amount(), dec!(2.68));
        assert_eq!(Money::of(dec!(-1.005)).amount(), dec!(-1.01));
    }

    #[test]
    fn of_pads_scale_to_two_digits() {
        assert_eq!(Money::of(dec!(10)).amount().scale(), 2);
        assert_eq!(Money::of(dec!(10)).to_string(), "10.00");
        assert_eq!(Money::of(dec!(0.5)).to_string(), "0.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn arithmetic_results_stay_normalized() {
        let a = Money::of(dec!(10.10));
        let b = Money::of(dec!(0.05));

        assert_eq!((a + b).amount(), dec!(10.15));
        assert_eq!((a - b).amount(), dec!(10.05));
        assert_eq!(a.multiply(3).amount(), dec!(30.30));
        assert_eq!(a.multiply(3).amount().scale(), 2);
    }

    #[test]
    fn multiply_by_fraction_rounds() {
        let subtotal = Money::of(dec!(2079.97));
        let tax = subtotal.multiply_by(dec!(0.19));
        assert_eq!(tax.amount(), dec!(395.19));
        assert_eq!(tax.amount().scale(), 2);
    }

    #[test]
    fn negative_factor_is_not_rejected() {
        let m = Money::of(dec!(5.00));
        assert_eq!(m.multiply(-2).amount(), dec!(-10.00));
        assert!(m.multiply(-2).is_negative());
    }

    #[test]
    fn ordering_compares_amounts() {
        let small = Money::of(dec!(99.99));
        let threshold = Money::of(dec!(100));
        assert!(small < threshold);
        assert!(Money::of(dec!(100.00)) >= threshold);
        assert_eq!(Money::of(dec!(100)), Money::of(dec!(100.000)));
    }

    #[test]
    fn parse_from_string() {
        let m: Money = "5.99".parse().unwrap();
        assert_eq!(m.amount(), dec!(5.99));
        assert!(matches!(
            "five".parse::<Money>(),
            Err(MoneyParseError::Invalid { .. })
        ));
        assert!(matches!(
            "10000000000000000".parse::<Money>(),
            Err(MoneyParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn huge_amounts_saturate_with_two_digits() {
        let max = Money::of(Decimal::MAX);
        assert_eq!(max, Money::max_value());
        assert_eq!(max.amount().scale(), 2);
        assert_eq!(max.to_string(), "9999999999999999.99");

        let min = Money::of(Decimal::MIN);
        assert_eq!(min, -Money::max_value());
        assert_eq!(min.amount().scale(), 2);
    }

    #[test]
    fn arithmetic_at_the_bound_does_not_panic() {
        let max = Money::max_value();

        assert_eq!(max + max, max);
        assert_eq!(max.multiply(i64::MAX), max);
        assert_eq!(max.multiply(-3), -max);
        assert_eq!(max.multiply_by(Decimal::MAX), max);
        assert_eq!([max, max, max].into_iter().sum::<Money>(), max);
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let max = Money::max_value();
        let cent = Money::of(dec!(0.01));

        assert_eq!(Money::checked_of(Decimal::MAX / dec!(2)), None);
        assert_eq!(Money::checked_of(dec!(12.345)), Some(Money::of(dec!(12.35))));
        assert_eq!(max.checked_add(cent), None);
        assert_eq!(max.checked_multiply(2), None);
        assert_eq!(max.checked_multiply(i64::MAX), None);
        assert_eq!(cent.checked_multiply(3), Some(Money::of(dec!(0.03))));
    }

    #[test]
    fn sum_uses_zero_as_identity() {
        let empty: Vec<Money> = vec![];
        assert_eq!(empty.into_iter().sum::<Money>(), Money::zero());

        let total: Money = [dec!(1.10), dec!(2.20)].into_iter().map(Money::of).sum();
        assert_eq!(total.amount(), dec!(3.30));
    }

    #[test]
    fn deserialization_normalizes() {
        let m: Money = serde_json::from_str("\"1.005\"").unwrap();
        assert_eq!(m.amount(), dec!(1.01));
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"1.01\"");
    }
}
