//! Duplicate check against the external order system.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use ordering::OrderId;
use tokio::sync::RwLock;

use crate::error::Result;

/// Asks an external system whether it already knows an order.
#[async_trait]
pub trait DuplicateChecker: Send + Sync {
    /// Returns true if the order already exists externally.
    async fn exists_in_external_system(&self, order_id: OrderId) -> Result<bool>;
}

/// Stand-in for the external order API: a set of order ids it reports as known.
#[derive(Debug, Clone)]
pub struct ExternalOrderRegistry {
    endpoint: String,
    known: Arc<RwLock<HashSet<OrderId>>>,
}

impl ExternalOrderRegistry {
    /// Creates a registry that knows the given orders.
    pub fn new(endpoint: impl Into<String>, known: impl IntoIterator<Item = OrderId>) -> Self {
        Self {
            endpoint: endpoint.into(),
            known: Arc::new(RwLock::new(known.into_iter().collect())),
        }
    }

    /// Creates a registry that knows no orders.
    pub fn empty() -> Self {
        Self::new("memory://external-orders", [])
    }

    /// Marks an order as known externally.
    pub async fn register(&self, order_id: OrderId) {
        self.known.write().await.insert(order_id);
    }
}

#[async_trait]
impl DuplicateChecker for ExternalOrderRegistry {
    async fn exists_in_external_system(&self, order_id: OrderId) -> Result<bool> {
        let exists = self.known.read().await.contains(&order_id);
        tracing::debug!(%order_id, endpoint = %self.endpoint, exists, "checked external order system");
        Ok(exists)
    }
}
