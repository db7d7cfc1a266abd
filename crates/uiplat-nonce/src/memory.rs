//! In-memory nonce store for single-node deployments and tests.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use uiplat_core::config::nonce::MemoryNonceConfig;
use uiplat_core::result::AppResult;
use uiplat_core::traits::nonce::NonceStore;

/// A live nonce record: the binding value and its deadline.
#[derive(Debug, Clone)]
struct NonceRecord {
    binding: String,
    expires_at: Instant,
}

/// In-memory nonce store backed by a sharded concurrent map.
///
/// `consume` relies on `DashMap::remove_if`, which evaluates the binding
/// check and the removal under the shard lock, giving the atomic
/// check-and-consume semantics the rotation flow requires.
#[derive(Debug)]
pub struct MemoryNonceStore {
    records: DashMap<String, NonceRecord>,
    /// Record count at which expired entries are swept on insert. Not a
    /// hard cap: live records are never evicted.
    purge_threshold: usize,
}

impl MemoryNonceStore {
    /// Create a new in-memory nonce store from configuration.
    pub fn new(config: &MemoryNonceConfig) -> Self {
        Self {
            records: DashMap::new(),
            purge_threshold: config.purge_threshold,
        }
    }

    /// Drop every record whose deadline has passed.
    fn purge_expired(&self) {
        let now = Instant::now();
        let before = self.records.len();
        self.records.retain(|_, rec| rec.expires_at > now);
        debug!(
            purged = before - self.records.len(),
            remaining = self.records.len(),
            "Purged expired nonce records"
        );
    }

    /// Number of records currently held (live and not-yet-purged expired).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl NonceStore for MemoryNonceStore {
    async fn save(&self, nonce: &str, binding: &str, ttl: Duration) -> AppResult<()> {
        if self.records.len() >= self.purge_threshold {
            self.purge_expired();
        }
        self.records.insert(
            nonce.to_string(),
            NonceRecord {
                binding: binding.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn consume(&self, nonce: &str, binding: &str) -> AppResult<bool> {
        let now = Instant::now();
        let removed = self
            .records
            .remove_if(nonce, |_, rec| {
                rec.binding == binding && rec.expires_at > now
            })
            .is_some();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store() -> MemoryNonceStore {
        MemoryNonceStore::new(&MemoryNonceConfig {
            purge_threshold: 1000,
        })
    }

    #[tokio::test]
    async fn test_save_then_consume() {
        let store = make_store();
        store
            .save("n1", "hash-a", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(store.consume("n1", "hash-a").await.unwrap());
    }

    #[tokio::test]
    async fn test_consume_is_single_use() {
        let store = make_store();
        store
            .save("n2", "hash-a", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(store.consume("n2", "hash-a").await.unwrap());
        assert!(!store.consume("n2", "hash-a").await.unwrap());
    }

    #[tokio::test]
    async fn test_consume_rejects_wrong_binding() {
        let store = make_store();
        store
            .save("n3", "hash-a", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(!store.consume("n3", "hash-b").await.unwrap());
        // A mismatched attempt does not destroy the record.
        assert!(store.consume("n3", "hash-a").await.unwrap());
    }

    #[tokio::test]
    async fn test_consume_unknown_nonce() {
        let store = make_store();
        assert!(!store.consume("never-saved", "hash-a").await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_record_is_invalid() {
        let store = make_store();
        store.save("n4", "hash-a", Duration::ZERO).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(!store.consume("n4", "hash-a").await.unwrap());
    }

    #[tokio::test]
    async fn test_resave_rebinds() {
        let store = make_store();
        store
            .save("n5", "hash-old", Duration::from_secs(60))
            .await
            .unwrap();
        store
            .save("n5", "hash-new", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(!store.consume("n5", "hash-old").await.unwrap());
        assert!(store.consume("n5", "hash-new").await.unwrap());
    }

    #[tokio::test]
    async fn test_purge_at_threshold() {
        let store = MemoryNonceStore::new(&MemoryNonceConfig { purge_threshold: 4 });
        for i in 0..4 {
            store
                .save(&format!("old{i}"), "h", Duration::ZERO)
                .await
                .unwrap();
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
        store.save("fresh", "h", Duration::from_secs(60)).await.unwrap();
        // The four expired records were swept on insert.
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_live_records_grow_past_threshold() {
        // The threshold only triggers a sweep of expired records; records
        // that are still live must never be evicted by new inserts.
        let store = MemoryNonceStore::new(&MemoryNonceConfig { purge_threshold: 4 });
        for i in 0..8 {
            store
                .save(&format!("live{i}"), "h", Duration::from_secs(60))
                .await
                .unwrap();
        }
        assert_eq!(store.len(), 8);
        for i in 0..8 {
            assert!(store.consume(&format!("live{i}"), "h").await.unwrap());
        }
    }
}
