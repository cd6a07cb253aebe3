//! Trait abstractions for runtime I/O
//!
//! The executor only sees [`ChatTransport`], which always resolves to a
//! message. Fallible services are adapted with [`ServiceTransport`].

use crate::conversation::Message;
use crate::transport::{ChatService, TransportErrorKind};
use async_trait::async_trait;
use std::sync::Arc;

/// Apology shown when the assistant service could not be reached
pub const SEND_UNREACHABLE_REPLY: &str = "Sorry, there was an error reaching the server.";
/// Apology shown when the service answered but the reply was unusable
pub const SEND_FAILED_REPLY: &str = "Sorry, there was an error processing your request.";
/// Apology shown when a reset did not go through
pub const RESET_FAILED_REPLY: &str = "Sorry, there was an error resetting the chat.";

/// Client for the assistant conversation
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send the user's text and resolve to the assistant's reply
    async fn send_message(&self, text: &str) -> Message;

    /// Start a fresh conversation and resolve to its seed message
    async fn reset_conversation(&self) -> Message;
}

// ============================================================================
// Arc implementation for trait objects
// ============================================================================

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for Arc<T> {
    async fn send_message(&self, text: &str) -> Message {
        (**self).send_message(text).await
    }

    async fn reset_conversation(&self) -> Message {
        (**self).reset_conversation().await
    }
}

// ============================================================================
// Service adapter
// ============================================================================

/// Turns service failures into assistant messages
pub struct ServiceTransport<S> {
    service: S,
}

impl<S: ChatService> ServiceTransport<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<S: ChatService> ChatTransport for ServiceTransport<S> {
    async fn send_message(&self, text: &str) -> Message {
        match self.service.chat(text).await {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, kind = ?e.kind, "Chat request failed");
                let reply = match e.kind {
                    TransportErrorKind::Network | TransportErrorKind::Timeout => {
                        SEND_UNREACHABLE_REPLY
                    }
                    TransportErrorKind::Server | TransportErrorKind::Decode => SEND_FAILED_REPLY,
                };
                Message::assistant(reply)
            }
        }
    }

    async fn reset_conversation(&self) -> Message {
        match self.service.reset().await {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, kind = ?e.kind, "Reset request failed");
                Message::assistant(RESET_FAILED_REPLY)
            }
        }
    }
}
