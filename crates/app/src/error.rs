//! Application-level error type.

use catalog::CatalogError;
use fulfillment::FulfillmentError;
use ordering::OrderError;
use thiserror::Error;

/// Errors raised while wiring or running the demo.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Fulfillment error: {0}")]
    Fulfillment(#[from] FulfillmentError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] OrderError),
}
