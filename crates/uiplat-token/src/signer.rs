//! Token signing with configurable secret and TTLs.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use rand::RngCore;
use rand::rngs::OsRng;

use uiplat_core::config::AuthConfig;

use super::claims::{Claims, ISSUER, TokenType};
use super::error::TokenError;

/// Creates signed access and refresh tokens.
///
/// Stateless: holds only key material and TTLs. Every token is signed with
/// a fresh `jti`, so no two token strings repeat even within one second.
#[derive(Clone)]
pub struct TokenSigner {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in hours.
    refresh_ttl_hours: i64,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_hours", &self.refresh_ttl_hours)
            .finish()
    }
}

/// A freshly issued access/refresh token pair.
///
/// The tokens themselves are the state; nothing about the pair is
/// persisted beyond the refresh token's nonce record.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Longer-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenSigner {
    /// Creates a new signer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.access_ttl_minutes as i64,
            refresh_ttl_hours: config.refresh_ttl_hours as i64,
        }
    }

    /// The refresh-token validity window, which is also the TTL of the
    /// nonce record saved alongside each refresh token.
    pub fn refresh_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_ttl_hours as u64 * 3600)
    }

    /// Signs an access token for the given user.
    pub fn sign_access(&self, user_id: &str) -> Result<(String, DateTime<Utc>), TokenError> {
        let exp = Utc::now() + chrono::Duration::minutes(self.access_ttl_minutes);
        let claims = Claims {
            user_id: user_id.to_string(),
            token_id: String::new(),
            token_type: TokenType::Access,
            nonce: String::new(),
            jti: random_hex128()?,
            exp: exp.timestamp(),
            iss: ISSUER.to_string(),
        };
        let token = self.sign(&claims)?;
        Ok((token, exp))
    }

    /// Signs a refresh token bound to the hash of its paired access token
    /// and carrying the given nonce.
    pub fn sign_refresh(
        &self,
        user_id: &str,
        access_token_hash: &str,
        nonce: &str,
    ) -> Result<(String, DateTime<Utc>), TokenError> {
        let exp = Utc::now() + chrono::Duration::hours(self.refresh_ttl_hours);
        let claims = Claims {
            user_id: user_id.to_string(),
            token_id: access_token_hash.to_string(),
            token_type: TokenType::Refresh,
            nonce: nonce.to_string(),
            jti: random_hex128()?,
            exp: exp.timestamp(),
            iss: ISSUER.to_string(),
        };
        let token = self.sign(&claims)?;
        Ok((token, exp))
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

/// 128 bits from the OS CSPRNG, hex-encoded.
///
/// Used for per-token `jti` values and for refresh nonces. A failing OS
/// entropy source is a signing failure, not a validation one.
pub(crate) fn random_hex128() -> Result<String, TokenError> {
    let mut bytes = [0u8; 16];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| TokenError::Signing(format!("random value generation failed: {e}")))?;
    Ok(hex::encode(bytes))
}
