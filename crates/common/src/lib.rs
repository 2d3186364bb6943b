//! Shared kernel for the order fulfillment system.
//!
//! Holds the pieces both bounded contexts build on:
//! - [`Money`], a two-decimal fixed-point amount with half-up rounding
//! - [`Version`] and the [`Aggregate`] trait for optimistic concurrency
//! - [`InMemoryRepository`], a versioned id → aggregate map

pub mod aggregate;
pub mod error;
pub mod memory;
pub mod money;
pub mod types;

pub use aggregate::Aggregate;
pub use error::StoreError;
pub use memory::InMemoryRepository;
pub use money::{Money, MoneyParseError};
pub use types::Version;
