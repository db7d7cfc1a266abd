//! No-op nonce store — an explicit opt-out of replay detection.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use uiplat_core::result::AppResult;
use uiplat_core::traits::nonce::NonceStore;

/// Nonce store that records nothing and accepts every nonce.
///
/// With this store a refresh token can be rotated any number of times
/// until it expires; the only remaining protections are the signature,
/// the expiry, and the access-token hash binding. It exists so that
/// deployments accepting bearer-token-only security state that choice in
/// configuration (`provider = "disabled"`) instead of getting it from an
/// accidentally missing backend.
#[derive(Debug, Default)]
pub struct NoopNonceStore;

impl NoopNonceStore {
    /// Create the opt-out store, warning loudly that replay detection is off.
    pub fn new() -> Self {
        warn!(
            "Nonce store is DISABLED: refresh-token replay detection is off \
             and rotated refresh tokens remain reusable until expiry"
        );
        Self
    }
}

#[async_trait]
impl NonceStore for NoopNonceStore {
    async fn save(&self, _nonce: &str, _binding: &str, _ttl: Duration) -> AppResult<()> {
        Ok(())
    }

    async fn consume(&self, _nonce: &str, _binding: &str) -> AppResult<bool> {
        Ok(true)
    }
}
