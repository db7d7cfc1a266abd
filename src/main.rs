//! UI Platform Auth Service
//!
//! Main entry point that wires configuration, the nonce store, and the
//! token service together and starts the HTTP server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use uiplat_api::{AppState, build_router};
use uiplat_core::config::AppConfig;
use uiplat_core::error::AppError;
use uiplat_nonce::NonceManager;
use uiplat_token::TokenService;

#[tokio::main]
async fn main() {
    let env = std::env::var("UIPLAT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting UI Platform auth service v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        "Initializing nonce store (provider: {})...",
        config.nonce.provider
    );
    let nonces = NonceManager::new(&config.nonce).await?;

    let token_service = Arc::new(TokenService::new(&config.auth, Arc::new(nonces))?);

    let config = Arc::new(config);
    let state = AppState::new(Arc::clone(&config), token_service);
    let router = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server failed: {e}")))?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolves when the process receives ctrl-c.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
