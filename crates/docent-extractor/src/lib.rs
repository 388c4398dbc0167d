//! Docent Extractor
//!
//! Converts source text into a list of study items (topics or questions)
//! using an LLM completion endpoint.
//!
//! # Overview
//!
//! ```text
//! Text → Extractor → CompletionProvider → JSON array → Items
//! ```
//!
//! The extractor owns the prompt pair for each extraction kind and the
//! parsing of the semi-structured completion output. Individual malformed
//! records in an otherwise valid response are tolerated and counted rather
//! than failing the extraction.
//!
//! # Example Usage
//!
//! ```no_run
//! use docent_extractor::{Extractor, ExtractorConfig, ExtractionRequest};
//! use docent_domain::ItemKind;
//! use docent_llm::MockProvider;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(MockProvider::new(r#"[{"topic": "Ownership"}]"#));
//! let extractor = Extractor::new(provider, ExtractorConfig::default());
//!
//! let outcome = extractor
//!     .extract(ExtractionRequest {
//!         text: "The ownership system is central to Rust.".to_string(),
//!         kind: ItemKind::Topic,
//!     })
//!     .await?;
//!
//! println!("Extracted {} items", outcome.items.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::{parse_labels, ParsedLabels};
pub use prompt::extraction_request;
pub use types::{ExtractionMetadata, ExtractionOutcome, ExtractionRequest};
