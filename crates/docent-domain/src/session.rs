//! Session module - the persisted record of one document's extraction results

use crate::item::Item;
use std::fmt;

/// Unique identifier for a session, based on UUIDv7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u128);

impl SessionId {
    /// Generate a new UUIDv7-based SessionId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a SessionId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a SessionId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUID string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A persisted study session
///
/// One session records the outcome of processing one document for one user:
/// the document title, the extracted source text, and the item lists derived
/// from it. A session is owned by exactly one user and is immutable once
/// created, apart from whole-row deletion and mode regeneration (which
/// replaces an item list wholesale).
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Unique identifier
    pub id: SessionId,

    /// Identity of the owning user
    pub owner_id: String,

    /// Human-readable title, usually the uploaded file name
    pub title: String,

    /// The full text extracted from the source document
    pub source_text: String,

    /// Extracted topics, empty if topic extraction has not run
    pub topics: Vec<Item>,

    /// Extracted questions, empty if question extraction has not run
    pub questions: Vec<Item>,

    /// When this session was created (Unix seconds)
    pub created_at: u64,
}

/// A session write request
///
/// Sessions are keyed by a content fingerprint derived from the owner
/// identity and the source text, so re-uploading the same document replaces
/// the existing row instead of duplicating it. Item lists are written as bare
/// labels; details are never persisted. A `None` list leaves any previously
/// stored list for that mode untouched.
#[derive(Debug, Clone)]
pub struct NewSession {
    /// Identity of the owning user
    pub owner_id: String,

    /// Human-readable title, usually the uploaded file name
    pub title: String,

    /// The full text extracted from the source document
    pub source_text: String,

    /// Topic labels to store, if topic extraction ran
    pub topics: Option<Vec<String>>,

    /// Question labels to store, if question extraction ran
    pub questions: Option<Vec<String>>,

    /// Content fingerprint used as the natural key for deduplication
    pub fingerprint: String,
}

/// A session as it appears in a listing
///
/// Carries enough to render a dashboard row without loading the source text
/// or item lists.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    /// Unique identifier
    pub id: SessionId,

    /// Human-readable title
    pub title: String,

    /// Whether topic extraction has run for this session
    pub has_topics: bool,

    /// Whether question extraction has run for this session
    pub has_questions: bool,

    /// When this session was created (Unix seconds)
    pub created_at: u64,
}
