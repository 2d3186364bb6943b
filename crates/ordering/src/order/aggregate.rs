//! Order aggregate implementation.

use common::{Aggregate, Money, Version};

use super::{
    CustomerId, OrderError, OrderId, OrderItem, OrderStatus, ProductId, Quantity, max_order_total,
};

/// Order aggregate root.
///
/// Owns its list of items exclusively. Items may only change while the
/// order is in Draft; confirmation and cancellation are one-way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    items: Vec<OrderItem>,
    status: OrderStatus,
    version: Version,
}

impl Aggregate for Order {
    type Id = OrderId;

    fn aggregate_type() -> &'static str {
        "Order"
    }

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}

// Query methods
impl Order {
    /// Returns the order id.
    pub fn order_id(&self) -> OrderId {
        self.id
    }

    /// Returns the customer who owns the order.
    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the items in insertion order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the item for a product, if present.
    pub fn get_item(&self, product_id: ProductId) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    /// Returns the number of lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the summed quantity over all lines.
    pub fn total_item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity().value()))
            .sum()
    }

    /// Returns true if the order has items.
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Returns true if the order has been confirmed.
    pub fn is_confirmed(&self) -> bool {
        self.status == OrderStatus::Confirmed
    }

    /// Returns the sum of all line subtotals.
    pub fn calculate_total(&self) -> Money {
        self.items.iter().map(OrderItem::subtotal).sum()
    }
}

// Command methods
impl Order {
    /// Creates a new, empty order in Draft.
    pub fn create(id: OrderId, customer_id: CustomerId) -> Self {
        Self {
            id,
            customer_id,
            items: Vec::new(),
            status: OrderStatus::Draft,
            version: Version::initial(),
        }
    }

    /// Adds an item to the order.
    ///
    /// If the product is already on the order, the quantities are summed
    /// and the unit price is replaced by the new one.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: Quantity,
        unit_price: Money,
    ) -> Result<(), OrderError> {
        self.ensure_modifiable()?;
        let candidate = OrderItem::new(product_id, quantity, unit_price)?;

        let mut items = self.items.clone();
        match self.position_of(product_id) {
            Some(index) => {
                let merged = items[index].quantity().checked_add(quantity)?;
                items[index] = OrderItem::new(product_id, merged, unit_price)?;
            }
            None => items.push(candidate),
        }
        self.set_items(items)
    }

    /// Replaces all items at once.
    pub fn replace_items(&mut self, items: Vec<OrderItem>) -> Result<(), OrderError> {
        self.ensure_modifiable()?;
        self.set_items(items)
    }

    /// Removes the line for a product. Removing an absent product is a no-op.
    pub fn remove_item(&mut self, product_id: ProductId) -> Result<(), OrderError> {
        self.ensure_modifiable()?;
        self.items.retain(|item| item.product_id() != product_id);
        Ok(())
    }

    /// Sets the quantity of an existing line. Absent products are ignored.
    pub fn update_item_quantity(
        &mut self,
        product_id: ProductId,
        new_quantity: Quantity,
    ) -> Result<(), OrderError> {
        self.ensure_modifiable()?;
        let Some(index) = self.position_of(product_id) else {
            return Ok(());
        };

        let unit_price = self.items[index].unit_price();
        let mut items = self.items.clone();
        items[index] = OrderItem::new(product_id, new_quantity, unit_price)?;
        self.set_items(items)
    }

    /// Checks that [`Order::confirm`] would succeed, without changing anything.
    pub fn ensure_confirmable(&self) -> Result<(), OrderError> {
        self.ensure_modifiable()?;
        if self.items.is_empty() {
            return Err(OrderError::EmptyOrder(self.id));
        }
        Ok(())
    }

    /// Confirms the order.
    ///
    /// Only the status changes; stock is handled by whoever drives the
    /// confirmation.
    pub fn confirm(&mut self) -> Result<(), OrderError> {
        self.ensure_confirmable()?;
        self.status = OrderStatus::Confirmed;
        Ok(())
    }

    /// Cancels a Draft order. Confirmed and Cancelled orders are final.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        self.ensure_modifiable()?;
        self.status = OrderStatus::Cancelled;
        Ok(())
    }

    fn position_of(&self, product_id: ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product_id() == product_id)
    }

    // Items are only swapped in when their total stays within range, so a
    // rejected change leaves the order untouched.
    fn set_items(&mut self, items: Vec<OrderItem>) -> Result<(), OrderError> {
        let total = items
            .iter()
            .try_fold(Money::zero(), |total, item| total.checked_add(item.subtotal()));
        match total {
            Some(total) if total <= max_order_total() => {
                self.items = items;
                Ok(())
            }
            _ => Err(OrderError::AmountOutOfRange),
        }
    }

    fn ensure_modifiable(&self) -> Result<(), OrderError> {
        if !self.status.is_modifiable() {
            return Err(OrderError::AlreadyConfirmed {
                order_id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }
}
