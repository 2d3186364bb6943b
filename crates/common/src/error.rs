//! Storage error types.

use thiserror::Error;

use crate::Version;

/// Errors raised by aggregate repositories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The aggregate was modified by someone else since it was loaded.
    #[error(
        "Concurrency conflict for {aggregate_type} {aggregate_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        aggregate_type: &'static str,
        aggregate_id: String,
        expected: Version,
        actual: Version,
    },
}
