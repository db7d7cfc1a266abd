//! Token signing configuration.

use serde::{Deserialize, Serialize};

/// Token signing and lifetime configuration.
///
/// The secret key and both TTLs are explicit construction-time inputs to
/// the token service; there is no process-wide signing state, so multiple
/// service instances (e.g. in tests) can run with different keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_hours: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_hours: default_refresh_ttl(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    // 24 hours
    1440
}

fn default_refresh_ttl() -> u64 {
    // 7 days
    168
}
