//! Claims structure embedded in access and refresh tokens.

use serde::{Deserialize, Serialize};

/// Issuer constant baked into every token at signing time.
pub const ISSUER: &str = "ui-platform-auth-service";

/// The payload signed inside every token.
///
/// The field set is closed and every field has a fixed contract, so this
/// is a typed struct rather than an open claim map. Optional string fields
/// are omitted from the wire payload when empty, which keeps access tokens
/// free of refresh-only fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Opaque identifier of the authenticated principal.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    /// For a refresh token: hex SHA-256 of the access token it was issued
    /// alongside. Empty for access tokens.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token_id: String,
    /// Discriminates access tokens from refresh tokens.
    pub token_type: TokenType,
    /// Single-use random value present only on refresh tokens.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nonce: String,
    /// Unique per-token identifier. `exp` has second resolution, so two
    /// tokens minted for the same user in the same second differ only by
    /// this value.
    #[serde(default)]
    pub jti: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issuing service identifier.
    pub iss: String,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived token authorizing individual requests.
    Access,
    /// Longer-lived token used solely to mint a new pair.
    Refresh,
}

impl TokenType {
    /// Wire name of the type, as serialized into the payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
