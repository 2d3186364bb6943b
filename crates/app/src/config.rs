//! Application configuration loaded from environment variables.

use common::Money;
use fulfillment::{CompensationPolicy, OrchestratorConfig};
use ordering::{PricingConfig, ShippingPolicy};
use rust_decimal::Decimal;

/// Which shipping rule the calculator applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShippingMode {
    /// Free at or above the threshold, base plus per-unit fee below it.
    Threshold,
    /// Base fee on every order.
    Flat,
}

/// Demo configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `TAX_RATE`: tax rate as a decimal fraction (default: `0.19`)
/// - `FREE_SHIPPING_THRESHOLD`: subtotal for free shipping (default: `100.00`)
/// - `BASE_SHIPPING`: base shipping fee (default: `5.99`)
/// - `PER_ITEM_SHIPPING`: fee per unit below the threshold (default: `1.00`)
/// - `SHIPPING_POLICY`: `threshold` or `flat` (default: `threshold`)
/// - `COMPENSATE_RESERVATIONS`: release stock on failure (default: `true`)
/// - `EXTERNAL_ORDER_IDS`: comma-separated ids known externally (default: `999,1000,1001`)
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub tax_rate: Decimal,
    pub free_shipping_threshold: Money,
    pub base_shipping: Money,
    pub per_item_shipping: Money,
    pub shipping_mode: ShippingMode,
    pub compensate_reservations: bool,
    pub external_order_ids: Vec<i64>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from any key lookup. Unparseable values fall back
    /// to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<Decimal>().ok());

        Self {
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            tax_rate: parsed("TAX_RATE").unwrap_or(defaults.tax_rate),
            free_shipping_threshold: parsed("FREE_SHIPPING_THRESHOLD")
                .map(Money::of)
                .unwrap_or(defaults.free_shipping_threshold),
            base_shipping: parsed("BASE_SHIPPING")
                .map(Money::of)
                .unwrap_or(defaults.base_shipping),
            per_item_shipping: parsed("PER_ITEM_SHIPPING")
                .map(Money::of)
                .unwrap_or(defaults.per_item_shipping),
            shipping_mode: match lookup("SHIPPING_POLICY").as_deref().map(str::trim) {
                Some("flat") => ShippingMode::Flat,
                Some("threshold") => ShippingMode::Threshold,
                _ => defaults.shipping_mode,
            },
            compensate_reservations: lookup("COMPENSATE_RESERVATIONS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.compensate_reservations),
            external_order_ids: lookup("EXTERNAL_ORDER_IDS")
                .map(|v| {
                    v.split(',')
                        .filter_map(|id| id.trim().parse().ok())
                        .collect()
                })
                .unwrap_or(defaults.external_order_ids),
        }
    }

    /// Returns the calculator pricing.
    pub fn pricing(&self) -> PricingConfig {
        let shipping = match self.shipping_mode {
            ShippingMode::Threshold => ShippingPolicy::FreeAboveThreshold {
                threshold: self.free_shipping_threshold,
                base: self.base_shipping,
                per_item: self.per_item_shipping,
            },
            ShippingMode::Flat => ShippingPolicy::Flat(self.base_shipping),
        };
        PricingConfig {
            tax_rate: self.tax_rate,
            shipping,
        }
    }

    /// Returns the orchestrator settings.
    pub fn orchestrator(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            compensation: if self.compensate_reservations {
                CompensationPolicy::ReleaseReserved
            } else {
                CompensationPolicy::None
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            tax_rate: Decimal::new(19, 2),
            free_shipping_threshold: Money::of(Decimal::new(10000, 2)),
            base_shipping: Money::of(Decimal::new(599, 2)),
            per_item_shipping: Money::of(Decimal::new(100, 2)),
            shipping_mode: ShippingMode::Threshold,
            compensate_reservations: true,
            external_order_ids: vec![999, 1000, 1001],
        }
    }
}
