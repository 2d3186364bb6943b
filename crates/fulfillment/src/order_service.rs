//! Application service for editing draft orders.

use common::Money;
use ordering::{CustomerId, Order, OrderId, OrderItem, ProductId, Quantity};
use rust_decimal::Decimal;

use crate::error::{FulfillmentError, Result};
use crate::services::OrderStore;

/// A raw order line as received from a caller, validated on use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRequest {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl OrderItemRequest {
    /// Creates a line request.
    pub fn new(product_id: i64, quantity: i64, unit_price: Decimal) -> Self {
        Self {
            product_id,
            quantity,
            unit_price,
        }
    }

    fn into_item(self) -> Result<OrderItem> {
        Ok(OrderItem::new(
            ProductId::new(self.product_id)?,
            Quantity::new(self.quantity)?,
            Money::of(self.unit_price),
        )?)
    }
}

/// Loads, mutates and saves orders on behalf of callers.
///
/// Every command is load, mutate, save; a concurrent writer surfaces as
/// [`FulfillmentError::Store`].
pub struct OrderService<O: OrderStore> {
    orders: O,
}

impl<O: OrderStore> OrderService<O> {
    /// Creates a service over an order store.
    pub fn new(orders: O) -> Self {
        Self { orders }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &O {
        &self.orders
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: i64) -> Result<Option<Order>> {
        self.orders.load_by_id(OrderId::new(order_id)?).await
    }

    /// Opens a new draft order.
    ///
    /// Fails with a store conflict if the id is taken.
    #[tracing::instrument(skip(self))]
    pub async fn place_order(&self, order_id: i64, customer_id: &str) -> Result<Order> {
        let order = Order::create(OrderId::new(order_id)?, CustomerId::new(customer_id)?);
        let order = self.orders.save(order).await?;
        tracing::info!(order_id = %order.order_id(), customer_id = %order.customer_id(), "order placed");
        Ok(order)
    }

    #[tracing::instrument(skip(self))]
    pub async fn add_item(&self, order_id: i64, item: OrderItemRequest) -> Result<Order> {
        let item = item.into_item()?;
        self.modify(order_id, |order| {
            order.add_item(item.product_id(), item.quantity(), item.unit_price())
        })
        .await
    }

    /// Replaces every line of a draft order.
    #[tracing::instrument(skip(self))]
    pub async fn replace_items(&self, order_id: i64, items: Vec<OrderItemRequest>) -> Result<Order> {
        let items = items
            .into_iter()
            .map(OrderItemRequest::into_item)
            .collect::<Result<Vec<_>>>()?;
        self.modify(order_id, |order| order.replace_items(items)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_item(&self, order_id: i64, product_id: i64) -> Result<Order> {
        let product_id = ProductId::new(product_id)?;
        self.modify(order_id, |order| order.remove_item(product_id))
            .await
    }

    /// Cancels a draft order.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: i64) -> Result<Order> {
        let order = self.modify(order_id, Order::cancel).await?;
        tracing::info!(order_id = %order.order_id(), "order cancelled");
        Ok(order)
    }

    async fn modify<F>(&self, order_id: i64, change: F) -> Result<Order>
    where
        F: FnOnce(&mut Order) -> std::result::Result<(), ordering::OrderError> + Send,
    {
        let order_id = OrderId::new(order_id)?;
        let mut order = self
            .orders
            .load_by_id(order_id)
            .await?
            .ok_or(FulfillmentError::OrderNotFound(order_id))?;
        change(&mut order)?;
        self.orders.save(order).await
    }
}
