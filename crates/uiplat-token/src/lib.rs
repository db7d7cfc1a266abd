//! # uiplat-token
//!
//! Token lifecycle for the UI Platform auth service: issuance of paired
//! access/refresh credentials, HMAC-SHA256 validation, and single-use
//! rotation of refresh tokens with replay detection through a pluggable
//! nonce store.
//!
//! ## Modules
//!
//! - `claims` — the signed payload carried by every token
//! - `signer` — stateless token signing with configured TTLs
//! - `verifier` — signature/expiry/type verification
//! - `service` — issue, validate, and rotate token pairs
//! - `error` — the token error taxonomy and its boundary collapse

pub mod claims;
pub mod error;
pub mod service;
pub mod signer;
pub mod verifier;

pub use claims::{Claims, TokenType};
pub use error::TokenError;
pub use service::TokenService;
pub use signer::{TokenPair, TokenSigner};
pub use verifier::TokenVerifier;
