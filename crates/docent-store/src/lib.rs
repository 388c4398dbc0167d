//! Docent Storage Layer
//!
//! Implements the `SessionStore` trait over SQLite.
//!
//! # Architecture
//!
//! - One `sessions` table, keyed by a content fingerprint for deduplication
//! - Item lists stored as JSON columns (`[{"topic": …}]`, `[{"question": …}]`),
//!   mirroring the wire shape the extraction endpoint produces
//! - Detail text is never persisted; reloaded sessions always start with
//!   absent details
//!
//! # Examples
//!
//! ```no_run
//! use docent_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for session operations
//! ```

#![warn(missing_docs)]

mod fingerprint;

use docent_domain::traits::SessionStore;
use docent_domain::{Item, ItemKind, NewSession, Session, SessionId, SessionSummary};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

pub use fingerprint::content_fingerprint;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format in a stored row
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of SessionStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Callers that share a store across
/// threads must wrap it in a mutex.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Convert SessionId to bytes for storage
    fn session_id_to_bytes(id: SessionId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    /// Convert bytes to SessionId
    fn bytes_to_session_id(bytes: &[u8]) -> Result<SessionId, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "Expected 16 bytes for SessionId, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(SessionId::from_value(u128::from_be_bytes(arr)))
    }

    /// Encode item labels as the persisted JSON column value
    fn labels_to_json(kind: ItemKind, labels: &[String]) -> String {
        let records: Vec<Value> = labels
            .iter()
            .map(|label| serde_json::json!({ kind.record_key(): label }))
            .collect();
        Value::Array(records).to_string()
    }

    /// Decode a persisted JSON column into items
    ///
    /// Tolerates a double-encoded column (a JSON string containing the array)
    /// and skips records that are not objects with the expected key. Details
    /// are never persisted, so every decoded item starts with none.
    fn items_from_json(kind: ItemKind, column: Option<&str>) -> Vec<Item> {
        let Some(raw) = column else {
            return Vec::new();
        };

        let Ok(mut value) = serde_json::from_str::<Value>(raw) else {
            return Vec::new();
        };

        // Some writers store the array as a JSON-encoded string
        if let Value::String(inner) = &value {
            match serde_json::from_str::<Value>(inner) {
                Ok(parsed) => value = parsed,
                Err(_) => return Vec::new(),
            }
        }

        let Some(records) = value.as_array() else {
            return Vec::new();
        };

        records
            .iter()
            .filter_map(|record| record.get(kind.record_key()).and_then(|v| v.as_str()))
            .map(Item::new)
            .collect()
    }

    /// Current time as Unix seconds
    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }
}

impl SessionStore for SqliteStore {
    type Error = StoreError;

    fn upsert_session(&mut self, session: NewSession) -> Result<SessionId, Self::Error> {
        let id = SessionId::new();
        let id_bytes = Self::session_id_to_bytes(id);

        let topics_json = session
            .topics
            .as_ref()
            .map(|labels| Self::labels_to_json(ItemKind::Topic, labels));
        let questions_json = session
            .questions
            .as_ref()
            .map(|labels| Self::labels_to_json(ItemKind::Question, labels));

        // On fingerprint conflict the existing row keeps its id and creation
        // time; item lists are only replaced for the modes being written
        self.conn.execute(
            "INSERT INTO sessions (id, owner_id, title, source_text, topics, questions, fingerprint, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(fingerprint) DO UPDATE SET
                 title = excluded.title,
                 topics = COALESCE(excluded.topics, sessions.topics),
                 questions = COALESCE(excluded.questions, sessions.questions)",
            params![
                &id_bytes,
                &session.owner_id,
                &session.title,
                &session.source_text,
                topics_json,
                questions_json,
                &session.fingerprint,
                Self::now_secs() as i64,
            ],
        )?;

        let stored_id: Vec<u8> = self.conn.query_row(
            "SELECT id FROM sessions WHERE fingerprint = ?1",
            params![&session.fingerprint],
            |row| row.get(0),
        )?;

        Self::bytes_to_session_id(&stored_id)
    }

    fn get_session(&self, id: SessionId, owner_id: &str) -> Result<Option<Session>, Self::Error> {
        let id_bytes = Self::session_id_to_bytes(id);

        let row = self
            .conn
            .query_row(
                "SELECT id, owner_id, title, source_text, topics, questions, created_at
                 FROM sessions WHERE id = ?1 AND owner_id = ?2",
                params![&id_bytes, owner_id],
                |row| {
                    let id_bytes: Vec<u8> = row.get(0)?;
                    let owner_id: String = row.get(1)?;
                    let title: String = row.get(2)?;
                    let source_text: String = row.get(3)?;
                    let topics: Option<String> = row.get(4)?;
                    let questions: Option<String> = row.get(5)?;
                    let created_at: i64 = row.get(6)?;
                    Ok((id_bytes, owner_id, title, source_text, topics, questions, created_at))
                },
            )
            .optional()?;

        let Some((id_bytes, owner_id, title, source_text, topics, questions, created_at)) = row
        else {
            return Ok(None);
        };

        Ok(Some(Session {
            id: Self::bytes_to_session_id(&id_bytes)?,
            owner_id,
            title,
            source_text,
            topics: Self::items_from_json(ItemKind::Topic, topics.as_deref()),
            questions: Self::items_from_json(ItemKind::Question, questions.as_deref()),
            created_at: created_at as u64,
        }))
    }

    fn list_sessions(&self, owner_id: &str) -> Result<Vec<SessionSummary>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, topics IS NOT NULL, questions IS NOT NULL, created_at
             FROM sessions WHERE owner_id = ?1
             ORDER BY created_at DESC, id DESC",
        )?;

        let rows = stmt.query_map(params![owner_id], |row| {
            let id_bytes: Vec<u8> = row.get(0)?;
            let title: String = row.get(1)?;
            let has_topics: bool = row.get(2)?;
            let has_questions: bool = row.get(3)?;
            let created_at: i64 = row.get(4)?;
            Ok((id_bytes, title, has_topics, has_questions, created_at))
        })?;

        let mut summaries = Vec::new();
        for row in rows {
            let (id_bytes, title, has_topics, has_questions, created_at) = row?;
            summaries.push(SessionSummary {
                id: Self::bytes_to_session_id(&id_bytes)?,
                title,
                has_topics,
                has_questions,
                created_at: created_at as u64,
            });
        }

        Ok(summaries)
    }

    fn delete_session(&mut self, id: SessionId, owner_id: &str) -> Result<bool, Self::Error> {
        let id_bytes = Self::session_id_to_bytes(id);

        let removed = self.conn.execute(
            "DELETE FROM sessions WHERE id = ?1 AND owner_id = ?2",
            params![&id_bytes, owner_id],
        )?;

        Ok(removed > 0)
    }

    fn delete_owner(&mut self, owner_id: &str) -> Result<usize, Self::Error> {
        let removed = self
            .conn
            .execute("DELETE FROM sessions WHERE owner_id = ?1", params![owner_id])?;

        Ok(removed)
    }
}
