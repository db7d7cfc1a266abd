//! Token service — issuance, validation, and single-use rotation.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use uiplat_core::config::AuthConfig;
use uiplat_core::error::AppError;
use uiplat_core::traits::nonce::NonceStore;

use super::claims::TokenType;
use super::error::TokenError;
use super::signer::{TokenPair, TokenSigner, random_hex128};
use super::verifier::TokenVerifier;

/// Orchestrates the token lifecycle over a signer, a verifier, and the
/// configured nonce store.
///
/// Stateless beyond the nonce store; safe to share across any number of
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct TokenService {
    /// Token signing primitive.
    signer: TokenSigner,
    /// Token verification primitive.
    verifier: TokenVerifier,
    /// Replay-detection store for refresh nonces.
    nonces: Arc<dyn NonceStore>,
}

impl TokenService {
    /// Creates a new token service from auth configuration and a nonce store.
    pub fn new(config: &AuthConfig, nonces: Arc<dyn NonceStore>) -> Result<Self, AppError> {
        if config.jwt_secret.is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret must not be empty",
            ));
        }
        Ok(Self {
            signer: TokenSigner::new(config),
            verifier: TokenVerifier::new(config),
            nonces,
        })
    }

    /// Issues a fresh access/refresh token pair for the given user.
    ///
    /// The refresh token embeds the hex SHA-256 of the access token and a
    /// fresh 128-bit nonce; the nonce is recorded in the store bound to the
    /// refresh token before the pair is handed out. Issuance is
    /// all-or-nothing: if the store write fails, no tokens are returned.
    pub async fn generate_token_pair(&self, user_id: &str) -> Result<TokenPair, TokenError> {
        let nonce = random_hex128()?;

        let (access_token, access_expires_at) = self.signer.sign_access(user_id)?;
        let access_hash = sha256_hex(&access_token);

        let (refresh_token, refresh_expires_at) =
            self.signer.sign_refresh(user_id, &access_hash, &nonce)?;

        self.nonces
            .save(&nonce, &sha256_hex(&refresh_token), self.signer.refresh_ttl())
            .await?;

        info!(user_id = %user_id, "Issued token pair");
        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Verifies a token of the expected type and returns the user id.
    ///
    /// Used with [`TokenType::Access`] for request authorization and with
    /// [`TokenType::Refresh`] inside the rotation flow.
    pub fn validate(&self, token: &str, expected: TokenType) -> Result<String, TokenError> {
        let claims = self.verifier.decode_typed(token, expected)?;
        Ok(claims.user_id)
    }

    /// Rotates a refresh token into a new access/refresh pair.
    ///
    /// The caller must present both the refresh token and the access token
    /// it was issued with (the access token may already be expired — only
    /// its hash is checked). The embedded nonce is consumed atomically and
    /// re-saved bound to the new refresh token, so a rotated refresh token
    /// cannot be replayed.
    pub async fn refresh_tokens(
        &self,
        refresh_token: &str,
        access_token: &str,
    ) -> Result<TokenPair, TokenError> {
        let claims = self
            .verifier
            .decode_typed(refresh_token, TokenType::Refresh)?;

        // The refresh token alone is insufficient; the caller must prove
        // knowledge of the access token it was paired with.
        if claims.token_id != sha256_hex(access_token) {
            debug!(user_id = %claims.user_id, "Refresh rejected: access token hash mismatch");
            return Err(TokenError::HashMismatch);
        }

        if claims.nonce.is_empty() {
            debug!(user_id = %claims.user_id, "Refresh rejected: token carries no nonce");
            return Err(TokenError::NonceInvalid);
        }

        let consumed = self
            .nonces
            .consume(&claims.nonce, &sha256_hex(refresh_token))
            .await?;
        if !consumed {
            debug!(user_id = %claims.user_id, "Refresh rejected: nonce consumed or rebound");
            return Err(TokenError::NonceInvalid);
        }

        // Mint the new pair, carrying the same nonce forward rebound to
        // the new refresh token.
        let (new_access, access_expires_at) = self.signer.sign_access(&claims.user_id)?;
        let new_access_hash = sha256_hex(&new_access);

        let (new_refresh, refresh_expires_at) =
            self.signer
                .sign_refresh(&claims.user_id, &new_access_hash, &claims.nonce)?;

        self.nonces
            .save(
                &claims.nonce,
                &sha256_hex(&new_refresh),
                self.signer.refresh_ttl(),
            )
            .await?;

        info!(user_id = %claims.user_id, "Rotated token pair");
        Ok(TokenPair {
            access_token: new_access,
            refresh_token: new_refresh,
            access_expires_at,
            refresh_expires_at,
        })
    }
}

/// Hex-encoded SHA-256 of a token string.
fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}
