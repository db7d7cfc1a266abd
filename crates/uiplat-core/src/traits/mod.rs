//! Cross-crate trait definitions.

pub mod nonce;

pub use nonce::NonceStore;
