//! Nonce store trait for pluggable replay-detection backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for nonce store backends (Redis, in-memory, or disabled).
///
/// A nonce is a one-time random value embedded in every refresh token.
/// The store records which nonce is currently valid and which refresh
/// token it is bound to; the binding value is opaque to the store (the
/// token service passes the hex SHA-256 of the refresh token string).
///
/// Without this record a leaked refresh token could be replayed until its
/// expiry even though the token itself verifies cryptographically.
#[async_trait]
pub trait NonceStore: Send + Sync + std::fmt::Debug + 'static {
    /// Records `nonce` as currently valid and bound to `binding`.
    ///
    /// Overwrites any existing record for the same nonce; rotation relies
    /// on this to rebind a carried-forward nonce to the new refresh token.
    /// The TTL must equal the refresh token's remaining validity window.
    async fn save(&self, nonce: &str, binding: &str, ttl: Duration) -> AppResult<()>;

    /// Atomically checks and consumes the record for `nonce`.
    ///
    /// Returns `true` only if a live record existed for `nonce` bound to
    /// exactly `binding`. The record is removed in the same step, so two
    /// concurrent rotations of the same refresh token cannot both observe
    /// a valid nonce.
    async fn consume(&self, nonce: &str, binding: &str) -> AppResult<bool>;
}
