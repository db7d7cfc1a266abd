//! Nonce store provider configuration.

use serde::{Deserialize, Serialize};

/// Top-level nonce store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonceConfig {
    /// Store provider type: `"memory"`, `"redis"`, or `"disabled"`.
    ///
    /// `"disabled"` turns off refresh-token replay detection entirely and
    /// must be an explicit, deliberate choice.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Redis-specific store configuration.
    #[serde(default)]
    pub redis: RedisNonceConfig,
    /// In-memory store configuration.
    #[serde(default)]
    pub memory: MemoryNonceConfig,
}

impl Default for NonceConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            redis: RedisNonceConfig::default(),
            memory: MemoryNonceConfig::default(),
        }
    }
}

/// Redis nonce store backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisNonceConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Key prefix for all nonce keys.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Per-command timeout in milliseconds. Store calls never block the
    /// caller past this bound; a timeout surfaces as a storage error.
    #[serde(default = "default_command_timeout")]
    pub command_timeout_ms: u64,
}

impl Default for RedisNonceConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_prefix: default_key_prefix(),
            command_timeout_ms: default_command_timeout(),
        }
    }
}

/// In-memory nonce store backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryNonceConfig {
    /// Record count at which expired entries are swept on insert. Live
    /// records are never evicted, so the store can exceed this while every
    /// record is still current.
    #[serde(default = "default_purge_threshold")]
    pub purge_threshold: usize,
}

impl Default for MemoryNonceConfig {
    fn default() -> Self {
        Self {
            purge_threshold: default_purge_threshold(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_key_prefix() -> String {
    "uiplat:".to_string()
}

fn default_command_timeout() -> u64 {
    2000
}

fn default_purge_threshold() -> usize {
    100_000
}
