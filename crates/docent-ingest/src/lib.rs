//! Docent Document Ingestion
//!
//! Turns an uploaded binary document into plain text for the extraction
//! pipeline. Only PDF input is accepted, validated by the declared content
//! type before the bytes are touched.
//!
//! `pdf-extract` returns all pages as one string with form feed characters
//! between pages; ingestion normalizes that into pages joined by blank lines
//! so downstream prompts see readable paragraph breaks.
//!
//! # Examples
//!
//! ```no_run
//! use docent_ingest::extract_text;
//!
//! let bytes = std::fs::read("notes.pdf").unwrap();
//! let text = extract_text(&bytes, "application/pdf").unwrap();
//! assert!(!text.is_empty());
//! ```

#![warn(missing_docs)]

use thiserror::Error;
use tracing::debug;

/// Errors that can occur during document ingestion
#[derive(Error, Debug)]
pub enum IngestError {
    /// The declared content type is not a supported document format
    #[error("Unsupported content type: {0} (only PDF is supported)")]
    UnsupportedType(String),

    /// The document bytes could not be parsed
    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    /// Parsing succeeded but produced no text
    #[error("Document contains no extractable text")]
    Empty,
}

/// Extract plain text from an uploaded document
///
/// The content type must declare PDF (`application/pdf` or any type
/// containing "pdf"); anything else is rejected before parsing. The result is
/// the concatenated text of all pages, separated by blank lines.
///
/// # Errors
///
/// Returns [`IngestError::UnsupportedType`] for non-PDF content types,
/// [`IngestError::Parse`] when the bytes are not a readable PDF, and
/// [`IngestError::Empty`] when the PDF contains no extractable text (for
/// example, a scanned document with no text layer).
pub fn extract_text(bytes: &[u8], content_type: &str) -> Result<String, IngestError> {
    if !content_type.to_ascii_lowercase().contains("pdf") {
        return Err(IngestError::UnsupportedType(content_type.to_string()));
    }

    extract_pdf_text(bytes)
}

/// Extract plain text from PDF bytes without content-type validation
///
/// Used directly when the input is already known to be a PDF, for example a
/// file selected by extension on the command line.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, IngestError> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| IngestError::Parse(e.to_string()))?;

    // pdf-extract inserts form feed characters (\x0C) between pages
    let pages: Vec<String> = raw
        .split('\x0C')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if pages.is_empty() {
        return Err(IngestError::Empty);
    }

    debug!("Extracted {} pages of text", pages.len());

    Ok(pages.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_pdf_content_type() {
        let result = extract_text(b"hello", "text/plain");
        assert!(matches!(result, Err(IngestError::UnsupportedType(_))));
    }

    #[test]
    fn test_accepts_pdf_content_type_variants() {
        // Both fail at the parse stage, not the content-type gate
        assert!(matches!(
            extract_text(b"not a pdf", "application/pdf"),
            Err(IngestError::Parse(_))
        ));
        assert!(matches!(
            extract_text(b"not a pdf", "application/x-pdf"),
            Err(IngestError::Parse(_))
        ));
    }

    #[test]
    fn test_garbage_bytes_fail_to_parse() {
        let result = extract_pdf_text(b"\x00\x01\x02\x03");
        assert!(matches!(result, Err(IngestError::Parse(_))));
    }

    #[test]
    fn test_error_messages_are_readable() {
        let err = extract_text(b"", "image/png").unwrap_err();
        assert!(err.to_string().contains("image/png"));
    }
}
