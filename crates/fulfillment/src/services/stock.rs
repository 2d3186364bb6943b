//! Ports toward the product side: stock reservation and product info.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use ordering::{ProductId, Quantity};
use tokio::sync::RwLock;

use crate::error::{FulfillmentError, Result};

/// Claims and returns stock for order lines.
///
/// Implemented by the product side; the workflow only sees this trait.
#[async_trait]
pub trait StockReservation: Send + Sync {
    /// Decrements stock for a product.
    ///
    /// Fails with `ProductNotFound` or `InsufficientStock` without changing
    /// anything.
    async fn reserve(&self, product_id: ProductId, quantity: Quantity) -> Result<()>;

    /// Returns previously reserved stock.
    async fn release(&self, product_id: ProductId, quantity: Quantity) -> Result<()>;
}

/// Display data about a product, used for audit logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInfo {
    pub product_id: ProductId,
    pub name: String,
    pub manufacturer: String,
}

/// Read-only product lookup.
#[async_trait]
pub trait ProductInfoLookup: Send + Sync {
    /// Returns display data for a product, or None if it is unknown.
    async fn load_product_info(&self, product_id: ProductId) -> Result<Option<ProductInfo>>;
}

#[derive(Debug, Default)]
struct InMemoryStockState {
    stock: HashMap<ProductId, u32>,
    info: HashMap<ProductId, ProductInfo>,
    reservations: Vec<(ProductId, Quantity)>,
    releases: Vec<(ProductId, Quantity)>,
    fail_on_release: bool,
}

/// In-memory stock counters for testing the workflow without a catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStockReservation {
    state: Arc<RwLock<InMemoryStockState>>,
}

impl InMemoryStockReservation {
    /// Creates an empty stock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stock level of a product.
    pub async fn set_stock(&self, product_id: ProductId, quantity: u32) {
        self.state.write().await.stock.insert(product_id, quantity);
    }

    /// Registers display data for a product.
    pub async fn set_info(&self, info: ProductInfo) {
        self.state.write().await.info.insert(info.product_id, info);
    }

    /// Configures release calls to fail.
    pub async fn set_fail_on_release(&self, fail: bool) {
        self.state.write().await.fail_on_release = fail;
    }

    /// Returns the current stock of a product.
    pub async fn stock_of(&self, product_id: ProductId) -> Option<u32> {
        self.state.read().await.stock.get(&product_id).copied()
    }

    /// Returns every successful reservation, in call order.
    pub async fn reservations(&self) -> Vec<(ProductId, Quantity)> {
        self.state.read().await.reservations.clone()
    }

    /// Returns every successful release, in call order.
    pub async fn releases(&self) -> Vec<(ProductId, Quantity)> {
        self.state.read().await.releases.clone()
    }
}

#[async_trait]
impl StockReservation for InMemoryStockReservation {
    async fn reserve(&self, product_id: ProductId, quantity: Quantity) -> Result<()> {
        let mut state = self.state.write().await;
        let available = *state
            .stock
            .get(&product_id)
            .ok_or(FulfillmentError::ProductNotFound(product_id))?;

        if available < quantity.value() {
            return Err(FulfillmentError::InsufficientStock {
                product_id,
                requested: quantity.value(),
                available,
            });
        }

        state.stock.insert(product_id, available - quantity.value());
        state.reservations.push((product_id, quantity));
        Ok(())
    }

    async fn release(&self, product_id: ProductId, quantity: Quantity) -> Result<()> {
        let mut state = self.state.write().await;
        if state.fail_on_release {
            return Err(FulfillmentError::ProductNotFound(product_id));
        }

        let current = state
            .stock
            .get(&product_id)
            .copied()
            .ok_or(FulfillmentError::ProductNotFound(product_id))?;
        state
            .stock
            .insert(product_id, current.saturating_add(quantity.value()));
        state.releases.push((product_id, quantity));
        Ok(())
    }
}

#[async_trait]
impl ProductInfoLookup for InMemoryStockReservation {
    async fn load_product_info(&self, product_id: ProductId) -> Result<Option<ProductInfo>> {
        Ok(self.state.read().await.info.get(&product_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: i64) -> ProductId {
        ProductId::new(id).unwrap()
    }

    fn qty(n: i64) -> Quantity {
        Quantity::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_reserve_and_release() {
        let stock = InMemoryStockReservation::new();
        stock.set_stock(pid(1), 5).await;

        stock.reserve(pid(1), qty(3)).await.unwrap();
        assert_eq!(stock.stock_of(pid(1)).await, Some(2));

        stock.release(pid(1), qty(3)).await.unwrap();
        assert_eq!(stock.stock_of(pid(1)).await, Some(5));
        assert_eq!(stock.reservations().await, vec![(pid(1), qty(3))]);
        assert_eq!(stock.releases().await, vec![(pid(1), qty(3))]);
    }

    #[tokio::test]
    async fn test_insufficient_stock_leaves_counter() {
        let stock = InMemoryStockReservation::new();
        stock.set_stock(pid(1), 5).await;

        let err = stock.reserve(pid(1), qty(10)).await.unwrap_err();
        assert_eq!(
            err,
            FulfillmentError::InsufficientStock {
                product_id: pid(1),
                requested: 10,
                available: 5,
            }
        );
        assert_eq!(stock.stock_of(pid(1)).await, Some(5));
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let stock = InMemoryStockReservation::new();
        assert_eq!(
            stock.reserve(pid(8), qty(1)).await,
            Err(FulfillmentError::ProductNotFound(pid(8)))
        );
        assert!(stock.load_product_info(pid(8)).await.unwrap().is_none());
    }
}
