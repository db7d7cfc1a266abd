//! # uiplat-nonce
//!
//! Nonce store providers for refresh-token replay detection. Supports
//! three modes:
//!
//! - **memory**: In-process store on [dashmap](https://crates.io/crates/dashmap)
//! - **redis**: Redis-backed store using the [redis](https://crates.io/crates/redis) crate
//! - **disabled**: Explicit opt-out that accepts every nonce
//!
//! The provider is selected at runtime based on configuration. The
//! `consume` operation is atomic on every real backend: checking the
//! binding and deleting the record happen as one step, so concurrent
//! rotations of the same refresh token cannot both succeed.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod noop;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::NonceManager;
