//! Wiring for the order fulfillment demo.
//!
//! Builds the catalog, the order side, and the confirmation orchestrator
//! from a [`Config`], seeds demo data, and runs a scripted set of
//! confirmations with structured logging and metrics.

pub mod config;
pub mod error;

use std::sync::Arc;

use catalog::{CatalogAdapter, InMemoryProductStore, Product, StockService};
use fulfillment::{
    ConfirmationOrchestrator, ExternalOrderRegistry, FulfillmentError, InMemoryConfirmationStore,
    InMemoryNotificationSender, InMemoryOrderStore, OrderItemRequest, OrderService,
};
use ordering::{ConfirmationCalculator, OrderConfirmation, OrderId};
use rust_decimal::Decimal;

pub use config::{Config, ShippingMode};
pub use error::AppError;

/// Orchestrator wired to the in-memory stores and the real catalog.
pub type Orchestrator = ConfirmationOrchestrator<
    InMemoryOrderStore,
    InMemoryConfirmationStore,
    CatalogAdapter<InMemoryProductStore>,
    ExternalOrderRegistry,
    InMemoryNotificationSender,
>;

/// Everything the demo needs, sharing one set of stores.
pub struct AppContext {
    pub orders: OrderService<InMemoryOrderStore>,
    pub orchestrator: Orchestrator,
    pub catalog: StockService<InMemoryProductStore>,
    pub confirmations: InMemoryConfirmationStore,
    pub notifier: InMemoryNotificationSender,
    pub registry: ExternalOrderRegistry,
}

/// Outcome of [`AppContext::run_demo`].
#[derive(Debug, Default)]
pub struct DemoReport {
    pub confirmed: Vec<OrderConfirmation>,
    pub rejected: Vec<(OrderId, FulfillmentError)>,
}

/// Builds the application context over a catalog store.
pub fn create_context(
    config: &Config,
    products: InMemoryProductStore,
) -> Result<AppContext, AppError> {
    let order_store = InMemoryOrderStore::new();
    let confirmations = InMemoryConfirmationStore::new();
    let notifier = InMemoryNotificationSender::new();

    let known = config
        .external_order_ids
        .iter()
        .map(|&id| OrderId::new(id))
        .collect::<Result<Vec<_>, _>>()?;
    let registry = ExternalOrderRegistry::new("memory://external-orders", known);

    let catalog = StockService::new(products);
    let adapter = CatalogAdapter::new(catalog.clone());

    let orchestrator = ConfirmationOrchestrator::new(
        order_store.clone(),
        confirmations.clone(),
        adapter.clone(),
        registry.clone(),
        notifier.clone(),
        ConfirmationCalculator::new(config.pricing()),
    )
    .with_config(config.orchestrator())
    .with_product_info(Arc::new(adapter));

    Ok(AppContext {
        orders: OrderService::new(order_store),
        orchestrator,
        catalog,
        confirmations,
        notifier,
        registry,
    })
}

/// Builds the application context over the demo catalog.
pub async fn create_default_context(config: &Config) -> Result<AppContext, AppError> {
    let products = InMemoryProductStore::with_demo_catalog().await?;
    create_context(config, products)
}

impl AppContext {
    /// Seeds the demo orders and returns their ids.
    ///
    /// Order 999 is one the external system already knows by default.
    pub async fn seed_demo_orders(&self) -> Result<Vec<OrderId>, AppError> {
        let demo: [(i64, &str, Vec<OrderItemRequest>); 3] = [
            (
                1,
                "CUST-001",
                vec![
                    OrderItemRequest::new(1, 2, Decimal::new(99999, 2)),
                    OrderItemRequest::new(3, 1, Decimal::new(7999, 2)),
                ],
            ),
            (
                2,
                "CUST-002",
                vec![OrderItemRequest::new(3, 1, Decimal::new(1000, 2))],
            ),
            (
                999,
                "CUST-003",
                vec![OrderItemRequest::new(2, 1, Decimal::new(4999, 2))],
            ),
        ];

        let mut ids = Vec::with_capacity(demo.len());
        for (order_id, customer_id, items) in demo {
            let order = self.orders.place_order(order_id, customer_id).await?;
            self.orders.replace_items(order_id, items).await?;
            ids.push(order.order_id());
        }
        Ok(ids)
    }

    /// Confirms every seeded order, then tries the first one again.
    ///
    /// Failed confirmations are collected in the report rather than aborting
    /// the run.
    #[tracing::instrument(skip(self))]
    pub async fn run_demo(&self, order_ids: &[OrderId]) -> DemoReport {
        let mut report = DemoReport::default();
        let retry = order_ids.first().copied();

        for &order_id in order_ids.iter().chain(retry.iter()) {
            match self.orchestrator.confirm_order(order_id).await {
                Ok(confirmation) => {
                    match serde_json::to_string(&confirmation) {
                        Ok(json) => {
                            tracing::info!(%order_id, confirmation = %json, "demo order confirmed")
                        }
                        Err(e) => {
                            tracing::warn!(%order_id, error = %e, "could not serialize confirmation")
                        }
                    }
                    report.confirmed.push(confirmation);
                }
                Err(e) => {
                    tracing::info!(%order_id, error = %e, "demo order rejected");
                    report.rejected.push((order_id, e));
                }
            }
        }

        report
    }

    /// Logs the stock level of every product.
    pub async fn log_stock(&self) -> Result<Vec<Product>, AppError> {
        let products = self.catalog.list_products().await?;
        for product in &products {
            tracing::info!(
                product_id = %product.product_id(),
                name = %product.name(),
                stock = product.stock_quantity(),
                "remaining stock"
            );
        }
        Ok(products)
    }
}
