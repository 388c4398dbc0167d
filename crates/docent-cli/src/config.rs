//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Identity that owns locally created sessions
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// SQLite database path; defaults to ~/.docent/docent.db
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Completion endpoint settings
    #[serde(default)]
    pub completion: CompletionSettings,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Completion endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionSettings {
    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

fn default_user_id() -> String {
    "local".to_string()
}

fn default_endpoint() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_api_key_env() -> String {
    "DOCENT_API_KEY".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            database_path: None,
            completion: CompletionSettings::default(),
            settings: Settings::default(),
        }
    }
}

impl Config {
    /// Get the configuration directory.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".docent"))
    }

    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from file or create default.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Resolve the database path, defaulting to ~/.docent/docent.db.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::dir()?.join("docent.db")),
        }
    }
}
