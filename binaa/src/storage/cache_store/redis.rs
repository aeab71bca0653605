use async_trait::async_trait;
use redis::{self, AsyncCommands};

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

use super::types::{CacheStore, RedisCacheStore};

const CACHE_PREFIX: &str = "cache";
const SCAN_BATCH: usize = 200;

impl RedisCacheStore {
    fn make_key(prefix: &str, key: &str) -> String {
        format!("{CACHE_PREFIX}:{prefix}:{key}")
    }

    fn make_pattern(prefix: &str) -> String {
        format!("{CACHE_PREFIX}:{prefix}:*")
    }

    // Kept outside the `cache:` namespace so removing a prefix never deletes its counter
    fn generation_key(prefix: &str) -> String {
        format!("{CACHE_PREFIX}_generation:{prefix}")
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn init(&self) -> Result<(), StorageError> {
        let _conn = self.client.get_multiplexed_async_connection().await?;
        Ok(())
    }

    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: usize,
    ) -> Result<(), StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let key = Self::make_key(prefix, key);
        let value = serde_json::to_string(&value)?;
        let _: () = conn.set(&key, value).await?;
        let _: () = conn.expire(&key, ttl as i64).await?;

        Ok(())
    }

    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let key = Self::make_key(prefix, key);
        let value: Option<String> = conn.get(&key).await?;

        match value {
            Some(v) => Ok(Some(serde_json::from_str(&v)?)),
            None => Ok(None),
        }
    }

    async fn generation(&self, prefix: &str) -> Result<u64, StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let value: Option<u64> = conn.get(Self::generation_key(prefix)).await?;
        Ok(value.unwrap_or(0))
    }

    async fn remove_prefix(&mut self, prefix: &str) -> Result<(), StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let _: u64 = conn.incr(Self::generation_key(prefix), 1u64).await?;

        // Cursor-based; KEYS would block the server
        let pattern = Self::make_pattern(prefix);
        let mut cursor: u64 = 0;
        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await?;
            if !keys.is_empty() {
                let _: () = conn.del(keys).await?;
            }
            if next == 0 {
                break;
            }
            cursor = next;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key_and_pattern() {
        assert_eq!(RedisCacheStore::make_key("projects", "q"), "cache:projects:q");
        assert_eq!(RedisCacheStore::make_pattern("projects"), "cache:projects:*");
        assert_eq!(
            RedisCacheStore::generation_key("projects"),
            "cache_generation:projects"
        );
        assert!(!RedisCacheStore::generation_key("projects").starts_with("cache:projects:"));
    }
}
