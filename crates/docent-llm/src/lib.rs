//! Docent Completion Provider Layer
//!
//! Implementations of the `CompletionProvider` trait from `docent-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic canned responses for testing
//! - `ChatCompletionsProvider`: OpenAI-compatible chat-completions API over
//!   HTTP (Groq, OpenAI, any compatible gateway)
//!
//! # Examples
//!
//! ```
//! use docent_llm::MockProvider;
//! use docent_domain::traits::{CompletionProvider, CompletionRequest};
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new("Hello from the model");
//! let request = CompletionRequest::new("You are helpful.", "Say hello");
//! let result = provider.complete(&request).await.unwrap();
//! assert_eq!(result, "Hello from the model");
//! # });
//! ```

#![warn(missing_docs)]

pub mod chat;

use async_trait::async_trait;
use docent_domain::traits::{CompletionProvider, CompletionRequest};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use chat::ChatCompletionsProvider;

/// Errors that can occur during completion operations
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The endpoint responded, but not with usable content
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded upstream
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Generic error
    #[error("Completion error: {0}")]
    Other(String),
}

/// Canned reply for a specific request
#[derive(Debug, Clone)]
enum CannedReply {
    Text(String),
    Failure(String),
}

/// Mock completion provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Replies are keyed on the request's user message; unmatched requests get
/// the default response.
///
/// # Examples
///
/// ```
/// use docent_llm::MockProvider;
/// use docent_domain::traits::{CompletionProvider, CompletionRequest};
///
/// # tokio_test::block_on(async {
/// let mut provider = MockProvider::default();
/// provider.add_response("question one", "answer one");
/// provider.add_failure("question two", "upstream exploded");
///
/// let ok = CompletionRequest::new("sys", "question one");
/// assert_eq!(provider.complete(&ok).await.unwrap(), "answer one");
///
/// let bad = CompletionRequest::new("sys", "question two");
/// assert!(provider.complete(&bad).await.is_err());
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    replies: Arc<Mutex<HashMap<String, CannedReply>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            replies: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific response for a given user message
    pub fn add_response(&mut self, user: impl Into<String>, response: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .insert(user.into(), CannedReply::Text(response.into()));
    }

    /// Configure a failure for a given user message
    pub fn add_failure(&mut self, user: impl Into<String>, message: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .insert(user.into(), CannedReply::Failure(message.into()));
    }

    /// Get the number of times `complete` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    type Error = CompletionError;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let replies = self.replies.lock().unwrap();
        match replies.get(&request.user) {
            Some(CannedReply::Text(text)) => Ok(text.clone()),
            Some(CannedReply::Failure(message)) => {
                Err(CompletionError::Other(message.clone()))
            }
            None => Ok(self.default_response.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let request = CompletionRequest::new("sys", "any message");
        let result = provider.complete(&request).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        let hello = CompletionRequest::new("sys", "hello");
        let foo = CompletionRequest::new("sys", "foo");
        let unknown = CompletionRequest::new("sys", "unknown");

        assert_eq!(provider.complete(&hello).await.unwrap(), "world");
        assert_eq!(provider.complete(&foo).await.unwrap(), "bar");
        assert_eq!(
            provider.complete(&unknown).await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        let request = CompletionRequest::new("sys", "prompt");

        assert_eq!(provider.call_count(), 0);

        provider.complete(&request).await.unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.complete(&request).await.unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_failure() {
        let mut provider = MockProvider::default();
        provider.add_failure("bad prompt", "simulated outage");

        let request = CompletionRequest::new("sys", "bad prompt");
        let result = provider.complete(&request).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("simulated outage"));
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        let request = CompletionRequest::new("sys", "prompt");
        provider1.complete(&request).await.unwrap();

        // Both share the same call count through the Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
