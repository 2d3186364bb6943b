//! Product catalog bounded context.
//!
//! This crate provides:
//! - Product aggregate owning its stock counter
//! - Product store trait with an in-memory implementation
//! - [`StockService`] for reserving and releasing stock
//! - [`CatalogAdapter`], the implementation of the fulfillment stock ports

pub mod adapter;
pub mod error;
pub mod product;
pub mod service;
pub mod store;

pub use adapter::CatalogAdapter;
pub use error::CatalogError;
pub use product::{Price, Product, ProductId, ProductName};
pub use service::StockService;
pub use store::{InMemoryProductStore, ProductStore};
