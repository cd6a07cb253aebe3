//! Mock implementations for testing
//!
//! These mocks enable runtime tests without a real assistant service.

use super::traits::ChatTransport;
use crate::conversation::Message;
use crate::transport::{ChatService, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, Semaphore};

// ============================================================================
// Mock Chat Service
// ============================================================================

/// Fallible service that returns queued results
pub struct MockChatService {
    chats: Mutex<VecDeque<Result<Message, TransportError>>>,
    resets: Mutex<VecDeque<Result<Message, TransportError>>>,
    /// Texts passed to `chat`, in order
    recorded: Mutex<Vec<String>>,
    reset_count: Mutex<usize>,
}

impl MockChatService {
    pub fn new() -> Self {
        Self {
            chats: Mutex::new(VecDeque::new()),
            resets: Mutex::new(VecDeque::new()),
            recorded: Mutex::new(Vec::new()),
            reset_count: Mutex::new(0),
        }
    }

    pub fn queue_chat(&self, result: Result<Message, TransportError>) {
        self.chats.lock().unwrap().push_back(result);
    }

    pub fn queue_reset(&self, result: Result<Message, TransportError>) {
        self.resets.lock().unwrap().push_back(result);
    }

    pub fn recorded_chats(&self) -> Vec<String> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn reset_calls(&self) -> usize {
        *self.reset_count.lock().unwrap()
    }
}

#[async_trait]
impl ChatService for MockChatService {
    async fn chat(&self, text: &str) -> Result<Message, TransportError> {
        self.recorded.lock().unwrap().push(text.to_string());
        self.chats
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::network("No mock chat queued")))
    }

    async fn reset(&self) -> Result<Message, TransportError> {
        *self.reset_count.lock().unwrap() += 1;
        self.resets
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::network("No mock reset queued")))
    }

    fn endpoint(&self) -> &str {
        "mock://assistant"
    }
}

// ============================================================================
// Mock Transport
// ============================================================================

/// Transport that answers immediately, echoing the input unless a reply
/// was queued
pub struct MockTransport {
    replies: Mutex<VecDeque<Message>>,
    reset_seed: Message,
    /// Record of all texts sent
    pub sent: Mutex<Vec<String>>,
    pub resets: Mutex<usize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            reset_seed: Message::assistant("Conversation reset."),
            sent: Mutex::new(Vec::new()),
            resets: Mutex::new(0),
        }
    }

    pub fn with_reset_seed(mut self, seed: Message) -> Self {
        self.reset_seed = seed;
        self
    }

    pub fn queue_reply(&self, reply: Message) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn reset_count(&self) -> usize {
        *self.resets.lock().unwrap()
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send_message(&self, text: &str) -> Message {
        self.sent.lock().unwrap().push(text.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Message::assistant(format!("echo: {text}")))
    }

    async fn reset_conversation(&self) -> Message {
        *self.resets.lock().unwrap() += 1;
        self.reset_seed.clone()
    }
}

// ============================================================================
// Gated Mock Transport (for in-flight testing)
// ============================================================================

/// Transport that holds every call until the test releases it
pub struct GatedTransport {
    inner: MockTransport,
    gate: Semaphore,
    /// Notified when a call reaches the gate
    pub request_started: Arc<Notify>,
}

impl GatedTransport {
    pub fn new() -> Self {
        Self::wrap(MockTransport::new())
    }

    pub fn wrap(inner: MockTransport) -> Self {
        Self {
            inner,
            gate: Semaphore::new(0),
            request_started: Arc::new(Notify::new()),
        }
    }

    /// Let one pending (or future) call complete
    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    pub fn inner(&self) -> &MockTransport {
        &self.inner
    }

    async fn pass_gate(&self) {
        self.request_started.notify_one();
        // The semaphore is never closed
        if let Ok(permit) = self.gate.acquire().await {
            permit.forget();
        }
    }
}

#[async_trait]
impl ChatTransport for GatedTransport {
    async fn send_message(&self, text: &str) -> Message {
        self.pass_gate().await;
        self.inner.send_message(text).await
    }

    async fn reset_conversation(&self) -> Message {
        self.pass_gate().await;
        self.inner.reset_conversation().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_echoes_by_default() {
        let transport = MockTransport::new();
        transport.queue_reply(Message::assistant("queued"));

        assert_eq!(transport.send_message("a").await, Message::assistant("queued"));
        assert_eq!(transport.send_message("b").await, Message::assistant("echo: b"));
        assert_eq!(transport.sent_texts(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_mock_chat_service_errors_when_empty() {
        let service = MockChatService::new();
        assert!(service.chat("hi").await.is_err());
        assert!(service.reset().await.is_err());
        assert_eq!(service.reset_calls(), 1);
    }

    #[tokio::test]
    async fn test_gated_transport_waits_for_release() {
        let transport = Arc::new(GatedTransport::new());
        let started = transport.request_started.clone();

        let call = tokio::spawn({
            let transport = transport.clone();
            async move { transport.send_message("held").await }
        });

        started.notified().await;
        assert!(!call.is_finished());

        transport.release();
        let reply = call.await.unwrap();
        assert_eq!(reply, Message::assistant("echo: held"));
    }
}
