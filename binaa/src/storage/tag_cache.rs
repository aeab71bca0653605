//! Read-through cache for query results, grouped by tag.
//!
//! Every entry lives under a tag (for example `users`); writes to the underlying data
//! invalidate the whole tag. Cache failures never fail the read, they only cost a fetch.
//!
//! Each tag carries a generation that invalidation bumps. Entries are keyed by the
//! generation seen before the fetch, so a fetch that overlaps an invalidation can never
//! be served after it.

use serde::{Serialize, de::DeserializeOwned};
use std::future::Future;

use super::cache_store::{CacheStore, GENERIC_CACHE_STORE};
use super::types::CacheData;

/// Returns the cached value for `(tag, key)`, or runs `fetch` and caches its result for `ttl` seconds
pub(crate) async fn get_or_fetch<T, E, F, Fut>(
    tag: &str,
    key: &str,
    ttl: usize,
    fetch: F,
) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let Some(generation) = current_generation(tag).await else {
        return fetch().await;
    };
    let entry_key = format!("{generation}:{key}");

    if let Some(value) = cached(tag, &entry_key).await {
        tracing::trace!(tag, key, generation, "Tag cache hit");
        return Ok(value);
    }

    let value = fetch().await?;

    let json = match serde_json::to_string(&value) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(tag, key, error = %e, "Failed to serialize value for tag cache");
            return Ok(value);
        }
    };

    let mut store = GENERIC_CACHE_STORE.lock().await;
    match store.generation(tag).await {
        Ok(now) if now == generation => {
            if let Err(e) = store
                .put_with_ttl(tag, &entry_key, CacheData { value: json }, ttl)
                .await
            {
                tracing::warn!(tag, key, error = %e, "Failed to populate tag cache");
            }
        }
        Ok(now) => {
            tracing::debug!(tag, key, generation, now, "Tag invalidated during fetch, not caching");
        }
        Err(e) => tracing::warn!(tag, key, error = %e, "Tag generation read failed"),
    }

    Ok(value)
}

/// `None` when the cache is unreachable; the read then bypasses the cache entirely
async fn current_generation(tag: &str) -> Option<u64> {
    let store = GENERIC_CACHE_STORE.lock().await;
    match store.generation(tag).await {
        Ok(generation) => Some(generation),
        Err(e) => {
            tracing::warn!(tag, error = %e, "Tag generation read failed");
            None
        }
    }
}

async fn cached<T: DeserializeOwned>(tag: &str, key: &str) -> Option<T> {
    let store = GENERIC_CACHE_STORE.lock().await;
    match store.get(tag, key).await {
        Ok(Some(data)) => match serde_json::from_str(&data.value) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(tag, key, error = %e, "Discarding undecodable tag cache entry");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(tag, key, error = %e, "Tag cache read failed");
            None
        }
    }
}

/// Drops every cached entry under `tag`
pub(crate) async fn invalidate_tag(tag: &str) {
    let mut store = GENERIC_CACHE_STORE.lock().await;
    match store.remove_prefix(tag).await {
        Ok(()) => tracing::debug!(tag, "Invalidated cache tag"),
        Err(e) => tracing::error!(tag, error = %e, "Failed to invalidate cache tag"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_environment;
    use serial_test::serial;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    #[serial]
    async fn test_get_or_fetch_caches_until_invalidated() {
        init_test_environment().await;
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let fetch = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(vec![1, 2, 3])
        };

        // First read misses and fetches
        let first: Vec<i32> = get_or_fetch("tag_cache_test", "k", 60, fetch).await.unwrap();
        // Second read is served from the cache
        let second: Vec<i32> = get_or_fetch("tag_cache_test", "k", 60, fetch).await.unwrap();

        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(second, first);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // After invalidation the next read fetches again
        invalidate_tag("tag_cache_test").await;
        let _: Vec<i32> = get_or_fetch("tag_cache_test", "k", 60, fetch).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    #[serial]
    async fn test_invalidation_during_fetch_is_not_masked() {
        init_test_environment().await;

        // Given a read whose fetch overlaps a write that invalidates the tag
        let stale: Vec<i32> = get_or_fetch("tag_cache_race", "k", 60, || async {
            invalidate_tag("tag_cache_race").await;
            Ok::<_, String>(vec![1])
        })
        .await
        .unwrap();
        assert_eq!(stale, vec![1]);

        // When reading again
        let fresh: Vec<i32> = get_or_fetch("tag_cache_race", "k", 60, || async {
            Ok::<_, String>(vec![1, 2])
        })
        .await
        .unwrap();

        // Then the pre-write rows were not cached
        assert_eq!(fresh, vec![1, 2]);

        invalidate_tag("tag_cache_race").await;
    }

    #[tokio::test]
    #[serial]
    async fn test_fetch_error_is_not_cached() {
        init_test_environment().await;
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        let result: Result<Vec<i32>, String> = get_or_fetch("tag_cache_err", "k", 60, move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err("db down".to_string())
        })
        .await;
        assert_eq!(result.unwrap_err(), "db down");

        let result: Result<Vec<i32>, String> = get_or_fetch("tag_cache_err", "k", 60, move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![7])
        })
        .await;
        assert_eq!(result.unwrap(), vec![7]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        invalidate_tag("tag_cache_err").await;
    }
}
