//! Collaborator ports used by the confirmation workflow, with in-memory
//! implementations.

pub mod confirmations;
pub mod duplicates;
pub mod notification;
pub mod orders;
pub mod stock;

pub use confirmations::{ConfirmationStore, InMemoryConfirmationStore};
pub use duplicates::{DuplicateChecker, ExternalOrderRegistry};
pub use notification::{InMemoryNotificationSender, NotificationSender, SentNotification};
pub use orders::{InMemoryOrderStore, OrderStore};
pub use stock::{InMemoryStockReservation, ProductInfo, ProductInfoLookup, StockReservation};
