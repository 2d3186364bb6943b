//! Confirmation store trait and in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use ordering::{ConfirmationId, OrderConfirmation, OrderId};
use tokio::sync::RwLock;

use crate::error::Result;

/// Persistence for order confirmations.
#[async_trait]
pub trait ConfirmationStore: Send + Sync {
    /// Stores a confirmation and returns it with its assigned id.
    async fn save(&self, confirmation: OrderConfirmation) -> Result<OrderConfirmation>;
}

#[derive(Debug, Default)]
struct InMemoryConfirmationState {
    records: Vec<OrderConfirmation>,
    next_id: u64,
}

/// In-memory confirmation store assigning sequential ids starting at 1.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfirmationStore {
    state: Arc<RwLock<InMemoryConfirmationState>>,
}

impl InMemoryConfirmationStore {
    /// Creates an empty confirmation store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored confirmations.
    pub async fn count(&self) -> usize {
        self.state.read().await.records.len()
    }

    /// Returns every confirmation recorded for an order.
    pub async fn find_by_order(&self, order_id: OrderId) -> Vec<OrderConfirmation> {
        self.state
            .read()
            .await
            .records
            .iter()
            .filter(|c| c.order_id() == order_id)
            .cloned()
            .collect()
    }

    /// Returns a confirmation by id.
    pub async fn get(&self, id: ConfirmationId) -> Option<OrderConfirmation> {
        self.state
            .read()
            .await
            .records
            .iter()
            .find(|c| c.id() == Some(id))
            .cloned()
    }
}

#[async_trait]
impl ConfirmationStore for InMemoryConfirmationStore {
    async fn save(&self, confirmation: OrderConfirmation) -> Result<OrderConfirmation> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let persisted = confirmation.with_id(ConfirmationId::new(state.next_id));
        state.records.push(persisted.clone());
        Ok(persisted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordering::{ConfirmationCalculator, CustomerId, Money, Order, ProductId, Quantity};
    use rust_decimal_macros::dec;

    fn confirmation_for(order_id: i64) -> OrderConfirmation {
        let mut order = Order::create(
            OrderId::new(order_id).unwrap(),
            CustomerId::new("CUST").unwrap(),
        );
        order
            .add_item(
                ProductId::new(1).unwrap(),
                Quantity::new(1).unwrap(),
                Money::of(dec!(10.00)),
            )
            .unwrap();
        ConfirmationCalculator::default().calculate(&order)
    }

    #[tokio::test]
    async fn test_sequential_ids() {
        let store = InMemoryConfirmationStore::new();

        let first = store.save(confirmation_for(1)).await.unwrap();
        let second = store.save(confirmation_for(2)).await.unwrap();

        assert_eq!(first.id(), Some(ConfirmationId::new(1)));
        assert_eq!(second.id(), Some(ConfirmationId::new(2)));
        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn test_find_by_order_and_get() {
        let store = InMemoryConfirmationStore::new();
        let saved = store.save(confirmation_for(5)).await.unwrap();
        store.save(confirmation_for(6)).await.unwrap();

        let found = store.find_by_order(OrderId::new(5).unwrap()).await;
        assert_eq!(found, vec![saved.clone()]);
        assert_eq!(store.get(ConfirmationId::new(1)).await, Some(saved));
        assert!(store.get(ConfirmationId::new(9)).await.is_none());
    }
}
