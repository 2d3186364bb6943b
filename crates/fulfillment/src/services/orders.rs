//! Order store trait and in-memory implementation.

use async_trait::async_trait;
use common::InMemoryRepository;
use ordering::{Order, OrderId};

use crate::error::Result;

/// Persistence for Order aggregates.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Loads an order, returning None if it doesn't exist.
    async fn load_by_id(&self, order_id: OrderId) -> Result<Option<Order>>;

    /// Saves an order and returns it at its new version.
    ///
    /// Fails with a concurrency conflict if the order changed since it was loaded.
    async fn save(&self, order: Order) -> Result<Order>;
}

/// In-memory order store. Clones share the same storage.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: InMemoryRepository<Order>,
}

impl InMemoryOrderStore {
    /// Creates an empty order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.len().await
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn load_by_id(&self, order_id: OrderId) -> Result<Option<Order>> {
        Ok(self.orders.load(&order_id).await)
    }

    async fn save(&self, order: Order) -> Result<Order> {
        Ok(self.orders.save(order).await?)
    }
}
