//! Core aggregate trait.

use std::fmt::Display;
use std::hash::Hash;

use crate::Version;

/// Trait for aggregate roots kept in a versioned repository.
///
/// An aggregate is a cluster of domain objects treated as a single unit.
/// The root enforces the invariants of the cluster; the repository only
/// needs its identity and version.
pub trait Aggregate: Clone + Send + Sync + 'static {
    /// Identity type of the aggregate.
    type Id: Clone + Eq + Hash + Display + Send + Sync + 'static;

    /// Returns the aggregate type name, used in error messages and logs.
    fn aggregate_type() -> &'static str;

    /// Returns the aggregate's identifier.
    fn id(&self) -> &Self::Id;

    /// Returns the version the aggregate was loaded at.
    fn version(&self) -> Version;

    /// Sets the aggregate version.
    ///
    /// Called by the repository after a successful save.
    fn set_version(&mut self, version: Version);
}
