//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use uiplat_core::config::AppConfig;
use uiplat_token::TokenService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Token issuance/validation/rotation service.
    pub token_service: Arc<TokenService>,
}

impl AppState {
    /// Creates the application state.
    pub fn new(config: Arc<AppConfig>, token_service: Arc<TokenService>) -> Self {
        Self {
            config,
            token_service,
        }
    }
}
