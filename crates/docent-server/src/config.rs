//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files: bind address, JWT secret, token expiry,
//! database path, and the completion endpoint to talk to.

use docent_extractor::ExtractorConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// JWT secret for signing bearer tokens
    pub jwt_secret: String,

    /// Token expiry in seconds (default: 3600 = 1 hour)
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: u64,

    /// SQLite database path (default: "docent.db")
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Completion endpoint settings
    pub completion: CompletionConfig,

    /// Extraction limits
    #[serde(default)]
    pub extractor: ExtractorSection,
}

/// Completion endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    /// API base URL (e.g., "https://api.groq.com/openai/v1")
    pub endpoint: String,

    /// Model name (e.g., "llama-3.3-70b-versatile")
    pub model: String,

    /// Environment variable holding the API key
    /// (default: "DOCENT_API_KEY")
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

/// Extraction limits section
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorSection {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Maximum time for a single extraction call (seconds)
    pub extraction_timeout_secs: u64,
}

impl Default for ExtractorSection {
    fn default() -> Self {
        let defaults = ExtractorConfig::default();
        Self {
            max_text_length: defaults.max_text_length,
            extraction_timeout_secs: defaults.extraction_timeout_secs,
        }
    }
}

impl ExtractorSection {
    /// Convert into the extractor crate's configuration type
    pub fn to_extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            max_text_length: self.max_text_length,
            extraction_timeout_secs: self.extraction_timeout_secs,
        }
    }
}

/// Default token expiry: 1 hour
fn default_token_expiry() -> u64 {
    3600
}

fn default_database_path() -> String {
    "docent.db".to_string()
}

fn default_api_key_env() -> String {
    "DOCENT_API_KEY".to_string()
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;

        if config.jwt_secret.is_empty() {
            return Err(ConfigError::MissingField("jwt_secret".to_string()));
        }

        Ok(config)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            jwt_secret: "test-secret-key-do-not-use-in-production".to_string(),
            token_expiry_secs: 3600,
            database_path: ":memory:".to_string(),
            completion: CompletionConfig {
                endpoint: "https://api.groq.com/openai/v1".to_string(),
                model: "llama-3.3-70b-versatile".to_string(),
                api_key_env: default_api_key_env(),
            },
            extractor: ExtractorSection::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 8080);
        assert_eq!(config.token_expiry_secs, 3600);
        assert_eq!(config.completion.api_key_env, "DOCENT_API_KEY");
    }

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            jwt_secret = "my-secret"
            token_expiry_secs = 7200
            database_path = "/var/lib/docent/docent.db"

            [completion]
            endpoint = "https://api.groq.com/openai/v1"
            model = "llama-3.3-70b-versatile"
            api_key_env = "GROQ_API_KEY"

            [extractor]
            max_text_length = 50000
            extraction_timeout_secs = 60
        "#;

        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.jwt_secret, "my-secret");
        assert_eq!(config.completion.model, "llama-3.3-70b-versatile");
        assert_eq!(config.completion.api_key_env, "GROQ_API_KEY");
        assert_eq!(config.extractor.max_text_length, 50000);
    }

    #[test]
    fn test_extractor_section_defaults() {
        let toml = r#"
            bind_address = "127.0.0.1"
            bind_port = 8080
            jwt_secret = "secret"

            [completion]
            endpoint = "https://api.groq.com/openai/v1"
            model = "llama-3.3-70b-versatile"
        "#;

        let config: ServerConfig = toml::from_str(toml).unwrap();
        let extractor = config.extractor.to_extractor_config();
        assert!(extractor.validate().is_ok());
    }
}
