//! Order confirmation workflow.
//!
//! The [`ConfirmationOrchestrator`] confirms an order by coordinating the
//! Order aggregate with stock held in another bounded context:
//! 1. Load the order and check it against the external system
//! 2. Reserve stock for every line, in order
//! 3. Confirm the order and price the confirmation
//! 4. Persist both, then notify the customer
//!
//! Stock lives behind the [`StockReservation`] port so the order side never
//! depends on the product model. On failure after a reservation, already
//! reserved stock is released in reverse order unless compensation is
//! switched off.

pub mod error;
pub mod orchestrator;
pub mod order_service;
pub mod services;

pub use error::FulfillmentError;
pub use orchestrator::{CompensationPolicy, ConfirmationOrchestrator, OrchestratorConfig};
pub use order_service::{OrderItemRequest, OrderService};
pub use services::{
    ConfirmationStore, DuplicateChecker, ExternalOrderRegistry, InMemoryConfirmationStore,
    InMemoryNotificationSender, InMemoryOrderStore, InMemoryStockReservation, NotificationSender,
    OrderStore, ProductInfo, ProductInfoLookup, SentNotification, StockReservation,
};
