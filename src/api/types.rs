//! API request and response types

use crate::conversation::{ConversationState, Message, Role};
use crate::render::ContentRenderer;
use serde::{Deserialize, Serialize};

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Request to replace the pending input
#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub text: String,
}

/// Response for delivered intents
#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub queued: bool,
    /// False when the session ignored the intent (blank text, or busy)
    pub accepted: bool,
}

impl QueuedResponse {
    pub fn queued(accepted: bool) -> Self {
        Self {
            queued: true,
            accepted,
        }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// One message as the page draws it
#[derive(Debug, Serialize)]
pub struct MessageView {
    pub role: Role,
    pub content: String,
    /// Rendered markup; empty for empty content
    pub html: String,
}

impl MessageView {
    fn new(message: &Message, renderer: &ContentRenderer) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
            html: if message.is_empty() {
                String::new()
            } else {
                renderer.render(&message.content)
            },
        }
    }
}

/// Full conversation as the page draws it
#[derive(Debug, Serialize)]
pub struct ConversationView {
    pub messages: Vec<MessageView>,
    pub busy: bool,
    pub draft: String,
}

impl ConversationView {
    pub fn new(state: &ConversationState, renderer: &ContentRenderer) -> Self {
        Self {
            messages: state
                .messages
                .iter()
                .map(|m| MessageView::new(m, renderer))
                .collect(),
            busy: state.busy,
            draft: state.draft.clone(),
        }
    }
}
