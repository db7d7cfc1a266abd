//! Token verification: signature, expiry, issuer, and type checks.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use uiplat_core::config::AuthConfig;

use super::claims::{Claims, ISSUER, TokenType};
use super::error::TokenError;

/// Validates token strings against the configured secret.
///
/// Pure function over the input and the configured key; no side effects.
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_issuer(&[ISSUER]);
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and verifies a token, additionally requiring its type to
    /// match `expected`.
    pub fn decode_typed(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        let claims = self.decode(token)?;
        if claims.token_type != expected {
            debug!(
                expected = %expected,
                actual = %claims.token_type,
                "Token type mismatch"
            );
            return Err(TokenError::WrongType);
        }
        Ok(claims)
    }

    /// Decodes and verifies signature, expiry, and issuer.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| Self::map_decode_error(&e))?;
        Ok(token_data.claims)
    }

    /// Maps jsonwebtoken failures onto the token error taxonomy.
    ///
    /// Anything that is not specifically a bad signature or an elapsed
    /// expiry counts as malformed: the structure (including the fixed
    /// issuer and required claims) did not match the contract.
    fn map_decode_error(err: &jsonwebtoken::errors::Error) -> TokenError {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => {
                debug!(error = %err, "Token failed structural validation");
                TokenError::Malformed
            }
        }
    }
}
