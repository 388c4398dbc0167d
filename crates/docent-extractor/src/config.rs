//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Maximum time for a single extraction call (seconds)
    pub extraction_timeout_secs: u64,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_text_length: 120_000,
            extraction_timeout_secs: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_max_text_length() {
        let mut config = ExtractorConfig::default();
        config.max_text_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_timeout() {
        let mut config = ExtractorConfig::default();
        config.extraction_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.max_text_length, parsed.max_text_length);
        assert_eq!(config.extraction_timeout_secs, parsed.extraction_timeout_secs);
    }
}
