//! Nonce manager that dispatches to the configured provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use uiplat_core::config::nonce::NonceConfig;
use uiplat_core::error::AppError;
use uiplat_core::result::AppResult;
use uiplat_core::traits::nonce::NonceStore;

/// Nonce manager that wraps the configured nonce store provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct NonceManager {
    /// The inner nonce store provider.
    inner: Arc<dyn NonceStore>,
}

impl NonceManager {
    /// Create a new nonce manager from configuration.
    pub async fn new(config: &NonceConfig) -> AppResult<Self> {
        let inner: Arc<dyn NonceStore> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis nonce store");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                let store = crate::redis::RedisNonceStore::new(
                    client,
                    Duration::from_millis(config.redis.command_timeout_ms),
                );
                Arc::new(store)
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory nonce store");
                Arc::new(crate::memory::MemoryNonceStore::new(&config.memory))
            }
            "disabled" => Arc::new(crate::noop::NoopNonceStore::new()),
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown nonce store provider: '{other}'. Supported: memory, redis, disabled"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a nonce manager from an existing store (for testing).
    pub fn from_store(store: Arc<dyn NonceStore>) -> Self {
        Self { inner: store }
    }

    /// Get a reference to the inner store.
    pub fn store(&self) -> &dyn NonceStore {
        self.inner.as_ref()
    }

    /// Clone out the inner store handle.
    pub fn store_arc(&self) -> Arc<dyn NonceStore> {
        Arc::clone(&self.inner)
    }
}

#[async_trait]
impl NonceStore for NonceManager {
    async fn save(&self, nonce: &str, binding: &str, ttl: Duration) -> AppResult<()> {
        self.inner.save(nonce, binding, ttl).await
    }

    async fn consume(&self, nonce: &str, binding: &str) -> AppResult<bool> {
        self.inner.consume(nonce, binding).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uiplat_core::config::nonce::NonceConfig;

    #[tokio::test]
    async fn test_memory_provider_selected() {
        let config = NonceConfig {
            provider: "memory".to_string(),
            ..NonceConfig::default()
        };
        let manager = NonceManager::new(&config).await.unwrap();
        manager
            .save("n", "h", Duration::from_secs(10))
            .await
            .unwrap();
        assert!(manager.consume("n", "h").await.unwrap());
        assert!(!manager.consume("n", "h").await.unwrap());
    }

    #[tokio::test]
    async fn test_disabled_provider_selected() {
        let config = NonceConfig {
            provider: "disabled".to_string(),
            ..NonceConfig::default()
        };
        let manager = NonceManager::new(&config).await.unwrap();
        assert!(manager.consume("anything", "h").await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_provider_rejected() {
        let config = NonceConfig {
            provider: "cassandra".to_string(),
            ..NonceConfig::default()
        };
        assert!(NonceManager::new(&config).await.is_err());
    }
}
