//! In-memory versioned repository.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{Aggregate, StoreError, Version};

/// In-memory repository mapping aggregate ids to aggregates.
///
/// Saves are checked optimistically: the aggregate being saved must carry
/// the version currently stored (or [`Version::initial`] if nothing is
/// stored yet). A stale save fails with [`StoreError::ConcurrencyConflict`]
/// instead of silently overwriting a concurrent writer.
///
/// Cloning the repository shares the underlying map.
#[derive(Clone)]
pub struct InMemoryRepository<A: Aggregate> {
    entries: Arc<RwLock<HashMap<A::Id, A>>>,
}

impl<A: Aggregate> Default for InMemoryRepository<A> {
    fn default() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<A: Aggregate> InMemoryRepository<A> {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the aggregate stored under `id`.
    pub async fn load(&self, id: &A::Id) -> Option<A> {
        self.entries.read().await.get(id).cloned()
    }

    /// Stores the aggregate and returns it at its new version.
    pub async fn save(&self, mut aggregate: A) -> Result<A, StoreError> {
        let mut entries = self.entries.write().await;

        let current = entries
            .get(aggregate.id())
            .map(|stored| stored.version())
            .unwrap_or(Version::initial());

        if aggregate.version() != current {
            return Err(StoreError::ConcurrencyConflict {
                aggregate_type: A::aggregate_type(),
                aggregate_id: aggregate.id().to_string(),
                expected: aggregate.version(),
                actual: current,
            });
        }

        aggregate.set_version(current.next());
        entries.insert(aggregate.id().clone(), aggregate.clone());
        Ok(aggregate)
    }

    /// Returns copies of all stored aggregates, in no particular order.
    pub async fn all(&self) -> Vec<A> {
        self.entries.read().await.values().cloned().collect()
    }

    /// Returns the number of stored aggregates.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Counter {
        id: u32,
        value: i32,
        version: Version,
    }

    impl Counter {
        fn new(id: u32) -> Self {
            Self {
                id,
                value: 0,
                version: Version::initial(),
            }
        }
    }

    impl Aggregate for Counter {
        type Id = u32;

        fn aggregate_type() -> &'static str {
            "Counter"
        }

        fn id(&self) -> &u32 {
            &self.id
        }

        fn version(&self) -> Version {
            self.version
        }

        fn set_version(&mut self, version: Version) {
            self.version = version;
        }
    }

    #[tokio::test]
    async fn save_assigns_first_version() {
        let repo = InMemoryRepository::new();
        let saved = repo.save(Counter::new(1)).await.unwrap();

        assert_eq!(saved.version, Version::first());
        assert_eq!(repo.load(&1).await.unwrap().version, Version::first());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn load_missing_returns_none() {
        let repo: InMemoryRepository<Counter> = InMemoryRepository::new();
        assert!(repo.load(&42).await.is_none());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn save_from_loaded_copy_bumps_version() {
        let repo = InMemoryRepository::new();
        repo.save(Counter::new(1)).await.unwrap();

        let mut loaded = repo.load(&1).await.unwrap();
        loaded.value = 7;
        let saved = repo.save(loaded).await.unwrap();

        assert_eq!(saved.version, Version::new(2));
        assert_eq!(repo.load(&1).await.unwrap().value, 7);
    }

    #[tokio::test]
    async fn stale_save_is_rejected() {
        let repo = InMemoryRepository::new();
        repo.save(Counter::new(1)).await.unwrap();

        let mut first = repo.load(&1).await.unwrap();
        let mut second = repo.load(&1).await.unwrap();

        first.value = 1;
        repo.save(first).await.unwrap();

        second.value = 2;
        let err = repo.save(second).await.unwrap_err();
        assert_eq!(
            err,
            StoreError::ConcurrencyConflict {
                aggregate_type: "Counter",
                aggregate_id: "1".to_string(),
                expected: Version::first(),
                actual: Version::new(2),
            }
        );
        assert_eq!(repo.load(&1).await.unwrap().value, 1);
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let repo = InMemoryRepository::new();
        let other = repo.clone();
        repo.save(Counter::new(3)).await.unwrap();
        assert!(other.load(&3).await.is_some());
        assert_eq!(other.all().await.len(), 1);
    }
}
