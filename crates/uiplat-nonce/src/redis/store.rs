//! Redis nonce store using a Lua script for atomic consume.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::warn;

use uiplat_core::error::{AppError, ErrorKind};
use uiplat_core::result::AppResult;
use uiplat_core::traits::nonce::NonceStore;

use crate::keys;

use super::client::RedisClient;

/// Lua script for atomic nonce consumption.
///
/// KEYS[1] = nonce record key
/// ARGV[1] = expected binding value
///
/// Returns:
///   1 = record existed with the expected binding and was deleted
///   0 = record missing, expired, or bound to a different token
///
/// The compare and the delete run as one script invocation, so two
/// concurrent rotations of the same refresh token cannot both see 1.
const CONSUME_SCRIPT: &str = r#"
    local current = redis.call('GET', KEYS[1])
    if current == ARGV[1] then
        redis.call('DEL', KEYS[1])
        return 1
    end
    return 0
"#;

/// Redis-backed nonce store for multi-node deployments.
#[derive(Debug, Clone)]
pub struct RedisNonceStore {
    /// Redis client.
    client: RedisClient,
    /// Per-command deadline.
    command_timeout: Duration,
}

impl RedisNonceStore {
    /// Create a new Redis nonce store.
    pub fn new(client: RedisClient, command_timeout: Duration) -> Self {
        Self {
            client,
            command_timeout,
        }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
    }

    /// Run a store command under the configured deadline.
    ///
    /// The caller must never hang on a slow or partitioned Redis; an
    /// elapsed deadline surfaces as a storage error instead.
    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = Result<T, redis::RedisError>>,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.command_timeout, fut).await {
            Ok(result) => result.map_err(Self::map_err),
            Err(_) => {
                warn!(
                    op,
                    timeout_ms = self.command_timeout.as_millis() as u64,
                    "Redis nonce command timed out"
                );
                Err(AppError::cache(format!(
                    "Redis nonce {op} timed out after {}ms",
                    self.command_timeout.as_millis()
                )))
            }
        }
    }
}

#[async_trait]
impl NonceStore for RedisNonceStore {
    async fn save(&self, nonce: &str, binding: &str, ttl: Duration) -> AppResult<()> {
        let full_key = self.client.prefixed_key(&keys::refresh_nonce(nonce));
        let mut conn = self.client.conn_mut();
        // SET with EX overwrites any prior binding, which is what rotation
        // relies on when it carries the nonce forward.
        let ttl_seconds = ttl.as_secs().max(1);
        self.bounded("save", async move {
            conn.set_ex::<_, _, ()>(&full_key, binding, ttl_seconds).await
        })
        .await
    }

    async fn consume(&self, nonce: &str, binding: &str) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(&keys::refresh_nonce(nonce));
        let mut conn = self.client.conn_mut();
        let binding = binding.to_string();
        let consumed: i64 = self
            .bounded("consume", async move {
                redis::Script::new(CONSUME_SCRIPT)
                    .key(&full_key)
                    .arg(&binding)
                    .invoke_async(&mut conn)
                    .await
            })
            .await?;
        Ok(consumed == 1)
    }
}
