//! In-memory cache implementation using the moka crate.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use ideabox_core::config::cache::CacheConfig;
use ideabox_core::result::AppResult;
use ideabox_core::traits::cache::CacheProvider;

/// In-memory cache provider using moka.
///
/// Entries expire a fixed time after insertion; the oldest are evicted
/// once `max_capacity` is reached.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    cache: Cache<String, String>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();

        Self { cache }
    }

    /// Number of entries currently held (approximate until pending work runs).
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_provider(ttl: u64) -> MemoryCacheProvider {
        MemoryCacheProvider::new(&CacheConfig {
            max_capacity: 100,
            time_to_live_seconds: ttl,
        })
    }

    #[tokio::test]
    async fn test_set_get() {
        let provider = make_provider(60);
        provider.set("key1", "value1").await.unwrap();
        let val = provider.get("key1").await.unwrap();
        assert_eq!(val, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let provider = make_provider(60);
        provider.set("key2", "value2").await.unwrap();
        provider.delete("key2").await.unwrap();
        assert_eq!(provider.get("key2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let provider = make_provider(1);
        provider.set("short", "lived").await.unwrap();
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(provider.get("short").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_health_check() {
        assert!(make_provider(60).health_check().await.unwrap());
    }
}
