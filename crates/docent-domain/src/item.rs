//! Item module - a single extracted topic or question

use std::fmt;

/// Unique identifier for an item, based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability, so items keep their extraction order
/// - 128-bit uniqueness without coordination
/// - RFC 9562-standard format with broad ecosystem support
///
/// Ephemeral per-item state (loading flags, cached detail text) is keyed by
/// this identifier rather than by list position, so it stays attached to the
/// right item if the list is ever reordered or grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u128);

impl ItemId {
    /// Generate a new UUIDv7-based ItemId
    ///
    /// # Examples
    ///
    /// ```
    /// use docent_domain::ItemId;
    ///
    /// let id = ItemId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an ItemId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an ItemId from a UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use docent_domain::ItemId;
    ///
    /// let id = ItemId::new();
    /// let parsed = ItemId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
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

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// The kind of item a session view works with
///
/// The kind selects the extraction prompt pair and the shape of the persisted
/// record (`{"topic": …}` vs `{"question": …}`), and the system instruction
/// used when fetching an item's detail text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// An important topic found in the source text
    Topic,
    /// A question found in (or asked about) the source text
    Question,
}

impl ItemKind {
    /// The JSON object key used for this kind in persisted records
    pub fn record_key(&self) -> &'static str {
        match self {
            ItemKind::Topic => "topic",
            ItemKind::Question => "question",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Topic => write!(f, "topic"),
            ItemKind::Question => write!(f, "question"),
        }
    }
}

/// A single extracted topic or question
///
/// The label is the topic or question text. The detail is the lazily fetched
/// LLM output (an explanation for a topic, an answer for a question); it is
/// absent until fetched and is never persisted. Items are created when
/// extraction completes or when a user adds one by hand; they are mutated by
/// label edits and detail fetches, and deleted only together with their
/// session.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,

    /// The topic or question text
    pub label: String,

    /// Lazily fetched detail text, absent until a fetch completes
    pub detail: Option<String>,
}

impl Item {
    /// Create a new item with the given label and no detail
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            label: label.into(),
            detail: None,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: ItemId ordering matches u128 ordering
        #[test]
        fn test_id_ordering_property(a: u128, b: u128) {
            let id_a = ItemId::from_value(a);
            let id_b = ItemId::from_value(b);

            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
            prop_assert_eq!(id_a > id_b, a > b);
        }

        /// Property: Round-trip through string representation preserves ID
        #[test]
        fn test_id_string_roundtrip(value: u128) {
            let id = ItemId::from_value(value);
            let id_str = id.to_string();

            match ItemId::from_string(&id_str) {
                Ok(parsed) => prop_assert_eq!(id, parsed),
                Err(e) => return Err(TestCaseError::fail(e)),
            }
        }
    }
}
