//! Product aggregate and related types.

mod aggregate;
mod value_objects;

pub use aggregate::Product;
pub use value_objects::{Price, ProductId, ProductName};
