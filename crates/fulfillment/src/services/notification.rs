//! Customer notification trait and in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use ordering::{CustomerId, OrderConfirmation};
use tokio::sync::RwLock;

/// Sends the confirmation to the customer.
///
/// Fire-and-forget: the workflow does not observe delivery failures.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Notifies a customer about a persisted confirmation.
    async fn send_order_confirmation(&self, customer_id: &CustomerId, confirmation: &OrderConfirmation);
}

/// A notification captured by [`InMemoryNotificationSender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub customer_id: CustomerId,
    pub confirmation: OrderConfirmation,
    pub body: String,
}

/// Notification sender that logs the rendered message and keeps an outbox.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationSender {
    outbox: Arc<RwLock<Vec<SentNotification>>>,
}

impl InMemoryNotificationSender {
    /// Creates a sender with an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything sent so far.
    pub async fn sent(&self) -> Vec<SentNotification> {
        self.outbox.read().await.clone()
    }

    /// Returns the number of notifications sent.
    pub async fn sent_count(&self) -> usize {
        self.outbox.read().await.len()
    }
}

fn render_body(customer_id: &CustomerId, confirmation: &OrderConfirmation) -> String {
    let number = confirmation
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "pending".to_string());

    format!(
        "Dear customer {customer_id},\n\
         \n\
         your order {order_id} has been confirmed.\n\
         \n\
         Confirmation no.: {number}\n\
         Subtotal: {subtotal} EUR\n\
         Tax: {tax} EUR\n\
         Shipping: {shipping} EUR\n\
         Total: {total} EUR\n\
         \n\
         Confirmed at: {at}\n",
        order_id = confirmation.order_id(),
        subtotal = confirmation.total_amount(),
        tax = confirmation.tax_amount(),
        shipping = confirmation.shipping_cost(),
        total = confirmation.grand_total(),
        at = confirmation.confirmed_at().to_rfc3339(),
    )
}

#[async_trait]
impl NotificationSender for InMemoryNotificationSender {
    async fn send_order_confirmation(&self, customer_id: &CustomerId, confirmation: &OrderConfirmation) {
        let body = render_body(customer_id, confirmation);
        tracing::info!(
            %customer_id,
            order_id = %confirmation.order_id(),
            grand_total = %confirmation.grand_total(),
            "sending order confirmation"
        );
        tracing::debug!(%body, "notification body");

        self.outbox.write().await.push(SentNotification {
            customer_id: customer_id.clone(),
            confirmation: confirmation.clone(),
            body,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordering::{ConfirmationCalculator, ConfirmationId, Money, Order, OrderId, ProductId, Quantity};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_records_rendered_notification() {
        let customer = CustomerId::new("CUST-001").unwrap();
        let mut order = Order::create(OrderId::new(1).unwrap(), customer.clone());
        order
            .add_item(
                ProductId::new(3).unwrap(),
                Quantity::new(1).unwrap(),
                Money::of(dec!(10.00)),
            )
            .unwrap();
        let confirmation = ConfirmationCalculator::default()
            .calculate(&order)
            .with_id(ConfirmationId::new(12));

        let sender = InMemoryNotificationSender::new();
        sender.send_order_confirmation(&customer, &confirmation).await;

        let sent = sender.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].customer_id, customer);
        assert!(sent[0].body.contains("Confirmation no.: 12"));
        assert!(sent[0].body.contains("Total: 18.89 EUR"));
    }
}
