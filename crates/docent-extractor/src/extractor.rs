//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_labels;
use crate::prompt::extraction_request;
use crate::types::{ExtractionMetadata, ExtractionOutcome, ExtractionRequest};
use docent_domain::traits::CompletionProvider;
use docent_domain::Item;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::time::timeout;
use tracing::{debug, info};

/// The Extractor turns source text into a list of items via the completion
/// provider
pub struct Extractor<P>
where
    P: CompletionProvider,
{
    provider: Arc<P>,
    config: ExtractorConfig,
}

impl<P> Extractor<P>
where
    P: CompletionProvider + Send + Sync,
{
    /// Create a new Extractor
    ///
    /// The provider is shared so the same client instance can also serve
    /// detail fetches elsewhere.
    pub fn new(provider: Arc<P>, config: ExtractorConfig) -> Self {
        Self { provider, config }
    }

    /// Extract items of the requested kind from the source text
    ///
    /// Builds the kind-specific prompt, calls the completion provider with
    /// the configured timeout, and parses the response as a JSON array of
    /// records. Malformed individual records are skipped and counted;
    /// a response that is not a JSON array fails the whole extraction.
    pub async fn extract(
        &self,
        request: ExtractionRequest,
    ) -> Result<ExtractionOutcome, ExtractorError> {
        if request.text.len() > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(
                request.text.len(),
                self.config.max_text_length,
            ));
        }

        info!(
            "Starting {} extraction, text length {}",
            request.kind,
            request.text.len()
        );

        let start_time = SystemTime::now();

        let completion_request = extraction_request(request.kind, &request.text);

        debug!(
            "Prompt length: {} chars",
            completion_request.system.len() + completion_request.user.len()
        );

        let response = timeout(
            self.config.extraction_timeout(),
            self.provider.complete(&completion_request),
        )
        .await
        .map_err(|_| ExtractorError::Timeout)?
        .map_err(|e| ExtractorError::Completion(e.to_string()))?;

        debug!("Completion response length: {} chars", response.len());

        let parsed = parse_labels(&response, request.kind)?;
        let records_attempted = parsed.labels.len() + parsed.skipped;

        let items: Vec<Item> = parsed.labels.into_iter().map(Item::new).collect();

        let processing_time_ms = start_time
            .elapsed()
            .unwrap_or(Duration::from_secs(0))
            .as_millis() as u64;

        info!(
            "Extraction complete: {} items, {} skipped",
            items.len(),
            parsed.skipped
        );

        Ok(ExtractionOutcome {
            items,
            skipped: parsed.skipped,
            metadata: ExtractionMetadata {
                kind: request.kind,
                records_attempted,
                processing_time_ms,
            },
        })
    }
}
