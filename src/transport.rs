//! Assistant service abstraction
//!
//! The conversation itself lives on the assistant service; this module
//! talks to it and reports failures as [`TransportError`].

mod error;
mod http;

pub use error::{TransportError, TransportErrorKind};
pub use http::HttpChatService;

use crate::conversation::Message;
use async_trait::async_trait;
use std::sync::Arc;

/// Remote assistant conversation
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Send a user message and return the assistant's reply
    async fn chat(&self, text: &str) -> Result<Message, TransportError>;

    /// Start a new conversation and return its seed message
    async fn reset(&self) -> Result<Message, TransportError>;

    /// Where requests go, for logging
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: ChatService + ?Sized> ChatService for Arc<T> {
    async fn chat(&self, text: &str) -> Result<Message, TransportError> {
        (**self).chat(text).await
    }

    async fn reset(&self) -> Result<Message, TransportError> {
        (**self).reset().await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// Logging wrapper for chat services
pub struct LoggingService {
    inner: Arc<dyn ChatService>,
    endpoint: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn ChatService>) -> Self {
        let endpoint = inner.endpoint().to_string();
        Self { inner, endpoint }
    }

    fn log_outcome(&self, operation: &str, started: std::time::Instant, result: &Result<Message, TransportError>) {
        let duration = started.elapsed();
        match result {
            Ok(message) => {
                tracing::info!(
                    endpoint = %self.endpoint,
                    operation,
                    duration_ms = %duration.as_millis(),
                    reply_len = message.content.len(),
                    "Assistant request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.endpoint,
                    operation,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    "Assistant request failed"
                );
            }
        }
    }
}

#[async_trait]
impl ChatService for LoggingService {
    async fn chat(&self, text: &str) -> Result<Message, TransportError> {
        let start = std::time::Instant::now();
        let result = self.inner.chat(text).await;
        self.log_outcome("chat", start, &result);
        result
    }

    async fn reset(&self) -> Result<Message, TransportError> {
        let start = std::time::Instant::now();
        let result = self.inner.reset().await;
        self.log_outcome("reset", start, &result);
        result
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
