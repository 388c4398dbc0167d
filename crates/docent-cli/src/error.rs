//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document ingestion error
    #[error("Ingestion error: {0}")]
    Ingest(#[from] docent_ingest::IngestError),

    /// Extraction error
    #[error("Extraction error: {0}")]
    Extract(#[from] docent_extractor::ExtractorError),

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] docent_store::StoreError),

    /// Explorer error
    #[error("{0}")]
    Explorer(#[from] docent_explorer::ExplorerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The configured API key environment variable is not set
    #[error("API key environment variable '{0}' is not set")]
    MissingApiKey(String),

    /// Session not found
    #[error("No session with id {0}")]
    SessionNotFound(String),
}
