//! Request and response types for extraction

use docent_domain::{Item, ItemKind};

/// Request to extract items from source text
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// Text to extract items from
    pub text: String,

    /// Which kind of items to extract (topics or questions)
    pub kind: ItemKind,
}

/// Result of an extraction operation
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// Items parsed from the completion response, in response order
    pub items: Vec<Item>,

    /// Number of records in the response that were skipped as malformed
    pub skipped: usize,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

/// Metadata about an extraction operation
#[derive(Debug, Clone)]
pub struct ExtractionMetadata {
    /// Which kind of items were extracted
    pub kind: ItemKind,

    /// Total number of records the response contained
    pub records_attempted: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
