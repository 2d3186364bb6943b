//! Confirmation orchestrator for the order confirmation workflow.

use std::sync::Arc;
use std::time::Instant;

use ordering::{ConfirmationCalculator, Order, OrderConfirmation, OrderId, ProductId, Quantity};

use crate::error::{FulfillmentError, Result};
use crate::services::{
    ConfirmationStore, DuplicateChecker, NotificationSender, OrderStore, ProductInfoLookup,
    StockReservation,
};

/// What to do with stock already reserved when a later step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompensationPolicy {
    /// Release every reservation made so far, most recent first.
    #[default]
    ReleaseReserved,
    /// Leave reservations in place.
    None,
}

/// Orchestrator settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrchestratorConfig {
    pub compensation: CompensationPolicy,
}

/// Confirms orders against stock held by the product side.
///
/// A confirmation loads the order, rejects orders the external system already
/// knows, reserves stock line by line, confirms and prices the order, then
/// persists both and notifies the customer. The first failing step ends the
/// call.
pub struct ConfirmationOrchestrator<O, C, S, D, N>
where
    O: OrderStore,
    C: ConfirmationStore,
    S: StockReservation,
    D: DuplicateChecker,
    N: NotificationSender,
{
    orders: O,
    confirmations: C,
    stock: S,
    duplicates: D,
    notifier: N,
    calculator: ConfirmationCalculator,
    product_info: Option<Arc<dyn ProductInfoLookup>>,
    config: OrchestratorConfig,
}

impl<O, C, S, D, N> ConfirmationOrchestrator<O, C, S, D, N>
where
    O: OrderStore,
    C: ConfirmationStore,
    S: StockReservation,
    D: DuplicateChecker,
    N: NotificationSender,
{
    /// Creates an orchestrator with the default configuration.
    pub fn new(
        orders: O,
        confirmations: C,
        stock: S,
        duplicates: D,
        notifier: N,
        calculator: ConfirmationCalculator,
    ) -> Self {
        Self {
            orders,
            confirmations,
            stock,
            duplicates,
            notifier,
            calculator,
            product_info: None,
            config: OrchestratorConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Enables the per-line audit log using product display data.
    pub fn with_product_info(mut self, lookup: Arc<dyn ProductInfoLookup>) -> Self {
        self.product_info = Some(lookup);
        self
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> OrchestratorConfig {
        self.config
    }

    /// Confirms an order and returns the persisted confirmation.
    #[tracing::instrument(skip(self))]
    pub async fn confirm_order(&self, order_id: OrderId) -> Result<OrderConfirmation> {
        metrics::counter!("order_confirmations_total").increment(1);
        let started = Instant::now();

        let result = self.run_confirmation(order_id).await;

        metrics::histogram!("order_confirmation_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        match &result {
            Ok(confirmation) => {
                metrics::counter!("order_confirmations_succeeded").increment(1);
                tracing::info!(
                    %order_id,
                    grand_total = %confirmation.grand_total(),
                    "order confirmed"
                );
            }
            Err(e) => {
                metrics::counter!("order_confirmations_failed", "reason" => e.kind()).increment(1);
                tracing::warn!(%order_id, error = %e, "order confirmation failed");
            }
        }
        result
    }

    async fn run_confirmation(&self, order_id: OrderId) -> Result<OrderConfirmation> {
        let order = self
            .orders
            .load_by_id(order_id)
            .await?
            .ok_or(FulfillmentError::OrderNotFound(order_id))?;

        if self.duplicates.exists_in_external_system(order_id).await? {
            return Err(FulfillmentError::OrderAlreadyExists(order_id));
        }

        // Rejected orders must not touch stock.
        order.ensure_confirmable()?;
        self.log_lines(&order).await;

        let lines: Vec<(ProductId, Quantity)> = order
            .items()
            .iter()
            .map(|item| (item.product_id(), item.quantity()))
            .collect();

        let mut reserved = Vec::with_capacity(lines.len());
        for (product_id, quantity) in lines {
            if let Err(e) = self.stock.reserve(product_id, quantity).await {
                self.compensate(order_id, &reserved).await;
                return Err(e);
            }
            tracing::debug!(%order_id, %product_id, quantity = quantity.value(), "stock reserved");
            reserved.push((product_id, quantity));
        }

        let (order, confirmation) = match self.confirm_and_save(order).await {
            Ok(done) => done,
            Err(e) => {
                self.compensate(order_id, &reserved).await;
                return Err(e);
            }
        };

        // The order is persisted as Confirmed from here on; stock stays reserved.
        let stored = self.confirmations.save(confirmation).await?;
        self.notifier
            .send_order_confirmation(order.customer_id(), &stored)
            .await;

        Ok(stored)
    }

    async fn confirm_and_save(&self, mut order: Order) -> Result<(Order, OrderConfirmation)> {
        order.confirm()?;
        let confirmation = self.calculator.calculate(&order);
        let order = self.orders.save(order).await?;
        Ok((order, confirmation))
    }

    async fn log_lines(&self, order: &Order) {
        let Some(lookup) = &self.product_info else {
            return;
        };

        for item in order.items() {
            let product_id = item.product_id();
            match lookup.load_product_info(product_id).await {
                Ok(Some(info)) => tracing::info!(
                    order_id = %order.order_id(),
                    %product_id,
                    name = %info.name,
                    manufacturer = %info.manufacturer,
                    quantity = item.quantity().value(),
                    "confirming line"
                ),
                Ok(None) => tracing::info!(
                    order_id = %order.order_id(),
                    %product_id,
                    manufacturer = "unknown manufacturer",
                    quantity = item.quantity().value(),
                    "confirming line"
                ),
                Err(e) => tracing::warn!(%product_id, error = %e, "product info lookup failed"),
            }
        }
    }

    async fn compensate(&self, order_id: OrderId, reserved: &[(ProductId, Quantity)]) {
        if reserved.is_empty() {
            return;
        }

        match self.config.compensation {
            CompensationPolicy::None => {
                tracing::warn!(
                    %order_id,
                    reservations = reserved.len(),
                    "leaving stock reserved after failed confirmation"
                );
            }
            CompensationPolicy::ReleaseReserved => {
                for &(product_id, quantity) in reserved.iter().rev() {
                    match self.stock.release(product_id, quantity).await {
                        Ok(()) => {
                            metrics::counter!("stock_reservations_compensated").increment(1);
                            tracing::info!(
                                %order_id,
                                %product_id,
                                quantity = quantity.value(),
                                "released reserved stock"
                            );
                        }
                        Err(e) => tracing::error!(
                            %order_id,
                            %product_id,
                            error = %e,
                            "failed to release reserved stock"
                        ),
                    }
                }
            }
        }
    }
}
