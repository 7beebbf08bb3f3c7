//! Cache manager wrapping the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use ideabox_core::config::cache::CacheConfig;
use ideabox_core::result::AppResult;
use ideabox_core::traits::cache::CacheProvider;

use crate::memory::MemoryCacheProvider;

/// Cache manager that wraps a cache provider and adds JSON helpers.
#[derive(Debug, Clone)]
pub struct CacheManager {
    inner: Arc<dyn CacheProvider>,
}

impl CacheManager {
    /// Create the in-memory cache described by the configuration.
    pub fn new(config: &CacheConfig) -> Self {
        info!(
            max_capacity = config.max_capacity,
            ttl_seconds = config.time_to_live_seconds,
            "Initializing in-memory cache provider"
        );
        Self {
            inner: Arc::new(MemoryCacheProvider::new(config)),
        }
    }

    /// Create a cache manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn CacheProvider>) -> Self {
        Self { inner: provider }
    }

    /// Read and deserialize a JSON value. Undecodable values count as a miss.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let Some(raw) = self.inner.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "Discarding undecodable cache entry");
                self.inner.delete(key).await?;
                Ok(None)
            }
        }
    }

    /// Serialize and store a JSON value.
    pub async fn set_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.inner.set(key, &raw).await
    }
}

#[async_trait]
impl CacheProvider for CacheManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_json_roundtrip() {
        let manager = CacheManager::new(&CacheConfig::default());
        let data = serde_json::json!({"title": "Example", "image": null});
        manager.set_json("json_key", &data).await.unwrap();
        let result: Option<serde_json::Value> = manager.get_json("json_key").await.unwrap();
        assert_eq!(result, Some(data));
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_a_miss() {
        let manager = CacheManager::new(&CacheConfig::default());
        manager.set("bad", "{not json").await.unwrap();
        let result: Option<serde_json::Value> = manager.get_json("bad").await.unwrap();
        assert!(result.is_none());
        assert!(manager.get("bad").await.unwrap().is_none());
    }
}
