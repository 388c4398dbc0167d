//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Completion provider error
    #[error("Completion error: {0}")]
    Completion(String),

    /// Input text exceeds the configured maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Extraction timed out
    #[error("Extraction timeout")]
    Timeout,

    /// The completion succeeded but its content was not the required shape
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
