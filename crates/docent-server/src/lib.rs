//! Docent Server
//!
//! HTTP surface for the document study pipeline: PDF upload and extraction,
//! session listing and views, per-item detail fetches, and owner-scoped
//! deletion, authenticated with JWT bearer tokens.

#![warn(missing_docs)]

pub mod auth;
pub mod config;
pub mod handlers;

use auth::AuthManager;
use config::ServerConfig;
use docent_llm::ChatCompletionsProvider;
use docent_store::{SqliteStore, StoreError};
use handlers::{create_router, AppState};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The configured API key environment variable is not set
    #[error("API key environment variable '{0}' is not set")]
    MissingApiKey(String),

    /// Store initialization error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the HTTP server
///
/// Initializes tracing, opens the database, builds the completion provider
/// from the configured endpoint (reading the API key from the configured
/// environment variable), and serves until shutdown.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Docent server");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path);
    info!(
        "Completion endpoint: {} ({})",
        config.completion.endpoint, config.completion.model
    );

    let api_key = std::env::var(&config.completion.api_key_env)
        .map_err(|_| ServerError::MissingApiKey(config.completion.api_key_env.clone()))?;

    let provider = Arc::new(ChatCompletionsProvider::new(
        &config.completion.endpoint,
        api_key,
        &config.completion.model,
    ));

    let store = Arc::new(Mutex::new(SqliteStore::new(&config.database_path)?));

    let auth = Arc::new(AuthManager::new(
        &config.jwt_secret,
        config.token_expiry_secs,
    ));

    let state = AppState {
        auth,
        store,
        provider,
        extractor_config: config.extractor.to_extractor_config(),
    };

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.token_expiry_secs, 3600);
        assert_eq!(config.database_path, ":memory:");
    }
}
