//! Token error taxonomy and its collapse at the application boundary.

use thiserror::Error;

use uiplat_core::error::AppError;

/// Everything that can go wrong while validating or rotating tokens.
///
/// The variants stay distinct inside this crate (and its tests, and log
/// lines); callers outside the crate only ever see the collapsed
/// [`AppError`] form.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token cannot be decoded into the expected structure.
    #[error("token is malformed")]
    Malformed,
    /// Signature does not verify under the configured secret.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// Current time is past the embedded expiry.
    #[error("token has expired")]
    Expired,
    /// The token's type does not match what the operation expects.
    #[error("unexpected token type")]
    WrongType,
    /// Presented access token's hash does not match the refresh token's
    /// bound token id.
    #[error("access token does not match refresh token binding")]
    HashMismatch,
    /// Nonce absent, already consumed, or bound to a different refresh token.
    #[error("refresh nonce is invalid")]
    NonceInvalid,
    /// The nonce store could not be reached or timed out.
    #[error("nonce store failure: {0}")]
    Storage(#[from] AppError),
    /// Key material misconfigured or the signing primitive failed.
    #[error("token signing failure: {0}")]
    Signing(String),
}

impl TokenError {
    /// True for client-caused validation failures, false for operational ones.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::Signing(_))
    }
}

/// Collapse into the application error per the propagation policy.
///
/// Validation failures become one undifferentiated authentication error so
/// the response gives an attacker no oracle for which check failed; the
/// specific variant is only ever logged. Operational failures keep their
/// server-error category.
impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Storage(inner) => inner,
            TokenError::Signing(msg) => AppError::internal(format!("token signing failed: {msg}")),
            _ => AppError::authentication("invalid token"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uiplat_core::error::ErrorKind;

    #[test]
    fn test_validation_variants_collapse_identically() {
        let variants = [
            TokenError::Malformed,
            TokenError::InvalidSignature,
            TokenError::Expired,
            TokenError::WrongType,
            TokenError::HashMismatch,
            TokenError::NonceInvalid,
        ];
        for v in variants {
            assert!(v.is_validation());
            let app: AppError = v.into();
            assert_eq!(app.kind, ErrorKind::Authentication);
            assert_eq!(app.message, "invalid token");
        }
    }

    #[test]
    fn test_operational_variants_stay_server_side() {
        let storage: AppError = TokenError::Storage(AppError::cache("redis down")).into();
        assert_eq!(storage.kind, ErrorKind::Cache);

        let signing: AppError = TokenError::Signing("bad key".to_string()).into();
        assert_eq!(signing.kind, ErrorKind::Internal);
        assert!(!signing.is_client_error());
    }
}
