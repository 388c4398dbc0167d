//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::session::{NewSession, Session, SessionId, SessionSummary};
use async_trait::async_trait;

/// A single completion request: a fixed system instruction plus a user
/// message embedding the query and any shared context.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instruction establishing role and output format
    pub system: String,

    /// User message carrying the query and context
    pub user: String,
}

impl CompletionRequest {
    /// Create a new completion request
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Trait for LLM completion operations
///
/// Implemented by the infrastructure layer (docent-llm). Callers treat any
/// error as opaque and surface its message; no retry obligations are placed
/// on callers.
#[async_trait]
pub trait CompletionProvider {
    /// Error type for completion operations
    type Error: std::fmt::Display + Send;

    /// Send a completion request and return the raw text response
    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error>;
}

/// Trait for persisting and retrieving sessions
///
/// Implemented by the infrastructure layer (docent-store). All reads and
/// deletes are owner-scoped: a session is only visible to, and deletable by,
/// the user identity that created it.
pub trait SessionStore {
    /// Error type for store operations
    type Error;

    /// Insert or replace a session keyed by its content fingerprint,
    /// returning the id of the stored row
    fn upsert_session(&mut self, session: NewSession) -> Result<SessionId, Self::Error>;

    /// Get a session by id, scoped to the given owner
    fn get_session(&self, id: SessionId, owner_id: &str) -> Result<Option<Session>, Self::Error>;

    /// List the owner's sessions, newest first
    fn list_sessions(&self, owner_id: &str) -> Result<Vec<SessionSummary>, Self::Error>;

    /// Delete a session by id, scoped to the given owner; returns whether a
    /// row was removed
    fn delete_session(&mut self, id: SessionId, owner_id: &str) -> Result<bool, Self::Error>;

    /// Delete every session owned by the given user; returns the number of
    /// rows removed
    fn delete_owner(&mut self, owner_id: &str) -> Result<usize, Self::Error>;
}
