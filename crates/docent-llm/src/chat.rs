//! OpenAI-compatible chat-completions provider
//!
//! Speaks the `/chat/completions` wire format used by Groq, OpenAI, and
//! compatible gateways: a model name, a system message, and a user message
//! in; the first choice's message content out.
//!
//! # Features
//!
//! - Async HTTP communication with bearer-token auth
//! - Configurable endpoint and model
//! - Bounded retry with exponential backoff for transient failures
//! - Request timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use docent_llm::ChatCompletionsProvider;
//!
//! let provider = ChatCompletionsProvider::new(
//!     "https://api.groq.com/openai/v1",
//!     "api-key",
//!     "llama-3.3-70b-versatile",
//! );
//! ```

use crate::CompletionError;
use async_trait::async_trait;
use docent_domain::traits::{CompletionProvider, CompletionRequest};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout for completion requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts before giving up
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Chat-completions API provider
///
/// Communicates with an OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionsProvider {
    endpoint: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

/// A single chat message
#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Response from the chat-completions API
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl ChatCompletionsProvider {
    /// Create a new chat-completions provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://api.groq.com/openai/v1")
    /// - `api_key`: bearer token for the Authorization header
    /// - `model`: model to use (e.g., "llama-3.3-70b-versatile")
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Send a completion request to the API
    ///
    /// Transient failures (transport errors, 5xx, 429) are retried with
    /// exponential backoff up to the configured attempt limit. Client errors
    /// (other 4xx) and malformed response bodies fail immediately.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The endpoint is unreachable or times out repeatedly
    /// - The API rejects the request
    /// - The response body is not the expected shape
    pub async fn send(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));

        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system.clone(),
                },
                ChatMessage {
                    role: "user",
                    content: request.user.clone(),
                },
            ],
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return Self::extract_content(response).await;
                    }

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(CompletionError::RateLimited);
                    } else if status.is_server_error() {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(CompletionError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    } else {
                        // Other client errors are not retryable
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        return Err(CompletionError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(CompletionError::Communication(format!(
                        "Request failed: {}",
                        e
                    )));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| CompletionError::Communication("Max retries exceeded".to_string())))
    }

    /// Pull the first choice's content out of a successful response
    async fn extract_content(response: reqwest::Response) -> Result<String, CompletionError> {
        let parsed: ChatResponse = response.json().await.map_err(|e| {
            CompletionError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::InvalidResponse("Response had no choices".to_string()))
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionsProvider {
    type Error = CompletionError;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider =
            ChatCompletionsProvider::new("https://api.groq.com/openai/v1", "key", "llama");
        assert_eq!(provider.endpoint, "https://api.groq.com/openai/v1");
        assert_eq!(provider.model, "llama");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_provider_with_max_retries() {
        let provider = ChatCompletionsProvider::new("http://localhost:8080", "key", "llama")
            .with_max_retries(5);
        assert_eq!(provider.max_retries, 5);
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "hello");
    }

    #[test]
    fn test_empty_choices_parses() {
        let body = r#"{"choices":[]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.choices.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_errors() {
        // Invalid port triggers a transport error without network access
        let provider = ChatCompletionsProvider::new("http://localhost:1", "key", "llama")
            .with_max_retries(1);

        let request = CompletionRequest::new("sys", "user");
        let result = provider.send(&request).await;
        assert!(result.is_err());

        match result {
            Err(CompletionError::Communication(_)) => {}
            other => panic!("Expected Communication error, got {:?}", other.err()),
        }
    }
}
