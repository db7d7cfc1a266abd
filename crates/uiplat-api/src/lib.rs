//! # uiplat-api
//!
//! HTTP API layer for the UI Platform auth service built on Axum.
//!
//! Provides the token boundary endpoints (refresh, identity, health), the
//! bearer-token extractor, DTOs, and error-to-status mapping. Credential
//! verification and user persistence live in other services; token
//! issuance is a library call on [`uiplat_token::TokenService`].

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
