//! Redis-backed nonce store for multi-node deployments.

pub mod client;
pub mod store;

pub use client::RedisClient;
pub use store::RedisNonceStore;
