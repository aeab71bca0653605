use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

use super::types::{CacheStore, InMemoryCacheStore};

const CACHE_PREFIX: &str = "cache";

impl InMemoryCacheStore {
    pub(crate) fn new() -> Self {
        tracing::info!("Creating new in-memory generic cache store");
        Self {
            entry: HashMap::new(),
            generations: HashMap::new(),
        }
    }

    fn make_key(prefix: &str, key: &str) -> String {
        format!("{CACHE_PREFIX}:{prefix}:{key}")
    }

    fn is_live(deadline: &Option<Instant>) -> bool {
        deadline.is_none_or(|d| Instant::now() < d)
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn init(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: usize,
    ) -> Result<(), StorageError> {
        let key = Self::make_key(prefix, key);
        let deadline = Instant::now().checked_add(Duration::from_secs(ttl as u64));
        // Drop expired entries so the map does not grow without bound
        self.entry.retain(|_, (_, d)| Self::is_live(d));
        self.entry.insert(key, (value, deadline));
        Ok(())
    }

    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError> {
        let key = Self::make_key(prefix, key);
        Ok(self
            .entry
            .get(&key)
            .filter(|(_, deadline)| Self::is_live(deadline))
            .map(|(value, _)| value.clone()))
    }

    async fn generation(&self, prefix: &str) -> Result<u64, StorageError> {
        Ok(self.generations.get(prefix).copied().unwrap_or(0))
    }

    async fn remove_prefix(&mut self, prefix: &str) -> Result<(), StorageError> {
        *self.generations.entry(prefix.to_string()).or_insert(0) += 1;
        let start = format!("{CACHE_PREFIX}:{prefix}:");
        self.entry.retain(|k, _| !k.starts_with(&start));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(value: &str) -> CacheData {
        CacheData {
            value: value.to_string(),
        }
    }

    #[test]
    fn test_make_key() {
        assert_eq!(InMemoryCacheStore::make_key("users", "list"), "cache:users:list");
    }

    #[tokio::test]
    async fn test_put_and_get() {
        // Given an in-memory cache store
        let mut store = InMemoryCacheStore::new();

        // When putting a value with a TTL
        store.put_with_ttl("users", "all", data("v1"), 60).await.unwrap();

        // Then it can be read back
        let got = store.get("users", "all").await.unwrap();
        assert_eq!(got.unwrap().value, "v1");
    }

    #[tokio::test]
    async fn test_zero_ttl_expires_immediately() {
        let mut store = InMemoryCacheStore::new();

        store.put_with_ttl("users", "all", data("v1"), 0).await.unwrap();

        assert!(store.get("users", "all").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_prefix_bumps_generation() {
        let mut store = InMemoryCacheStore::new();
        assert_eq!(store.generation("users").await.unwrap(), 0);

        store.remove_prefix("users").await.unwrap();
        store.remove_prefix("users").await.unwrap();

        assert_eq!(store.generation("users").await.unwrap(), 2);
        assert_eq!(store.generation("projects").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_remove_prefix_only_touches_that_prefix() {
        // Given entries under two tags, one tag being a prefix of the other's name
        let mut store = InMemoryCacheStore::new();
        store.put_with_ttl("projects", "a", data("1"), 60).await.unwrap();
        store.put_with_ttl("projects", "b", data("2"), 60).await.unwrap();
        store.put_with_ttl("projects_archive", "a", data("3"), 60).await.unwrap();
        store.put_with_ttl("users", "a", data("4"), 60).await.unwrap();

        // When removing the "projects" prefix
        store.remove_prefix("projects").await.unwrap();

        // Then only its entries are gone
        assert!(store.get("projects", "a").await.unwrap().is_none());
        assert!(store.get("projects", "b").await.unwrap().is_none());
        assert!(store.get("projects_archive", "a").await.unwrap().is_some());
        assert!(store.get("users", "a").await.unwrap().is_some());
    }
}
