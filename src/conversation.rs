//! Conversation data model and in-memory store
//!
//! The store is owned by the session runtime. Everything else reads
//! [`ConversationState`] snapshots, which are owned copies.

use serde::{Deserialize, Deserializer, Serialize};

/// Welcome text used when no custom welcome message is configured
pub const DEFAULT_WELCOME_MESSAGE: &str = "Welcome! I'm your AI assistant and I'm happy to help with any questions you have.\n\nI can assist you with:\n- Finding specific parts using part numbers or descriptions\n- Checking part compatibility with your appliance model\n- Providing installation guides and videos\n- Troubleshooting problems and estimating repair difficulty\n\nHow can I help you today?";

/// Speaker of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One turn in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    /// May be empty; empty messages render nothing
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Read-only view of a conversation handed to renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    pub busy: bool,
    /// Pending input buffer
    pub draft: String,
}

/// In-memory message log plus the busy flag
#[derive(Debug, Clone)]
pub struct ConversationStore {
    messages: Vec<Message>,
    busy: bool,
    draft: String,
}

impl ConversationStore {
    /// Create a store seeded with a single message
    pub fn new(seed: Message) -> Self {
        Self {
            messages: vec![seed],
            busy: false,
            draft: String::new(),
        }
    }

    /// Create a store seeded with an assistant welcome message
    pub fn with_welcome(text: impl Into<String>) -> Self {
        Self::new(Message::assistant(text))
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Discard the history and keep only `message`
    pub fn replace_all(&mut self, message: Message) {
        self.messages.clear();
        self.messages.push(message);
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Number of messages in history; never zero
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    #[cfg(test)]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[cfg(test)]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> ConversationState {
        ConversationState {
            messages: self.messages.clone(),
            busy: self.busy,
            draft: self.draft.clone(),
        }
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::with_welcome(DEFAULT_WELCOME_MESSAGE)
    }
}
