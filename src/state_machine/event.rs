//! Events that can occur in a chat session

use crate::conversation::Message;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User intents
    UserMessage {
        text: String,
    },
    ResetRequested,
    DraftChanged {
        text: String,
    },

    // Transport settlements
    ReplyReceived {
        message: Message,
    },
    ResetCompleted {
        message: Message,
    },
}

impl Event {
    pub fn user_message(text: impl Into<String>) -> Self {
        Event::UserMessage { text: text.into() }
    }

    pub fn draft_changed(text: impl Into<String>) -> Self {
        Event::DraftChanged { text: text.into() }
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Event::UserMessage { .. } => "user_message",
            Event::ResetRequested => "reset_requested",
            Event::DraftChanged { .. } => "draft_changed",
            Event::ReplyReceived { .. } => "reply_received",
            Event::ResetCompleted { .. } => "reset_completed",
        }
    }
}
