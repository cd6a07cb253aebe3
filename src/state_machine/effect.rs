//! Effects produced by state transitions

use crate::conversation::Message;

/// Effects to be executed, in order, after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Add a message to the end of the history
    AppendMessage { message: Message },

    /// Discard the history and keep only this message
    ReplaceHistory { message: Message },

    /// Toggle the busy flag shown to the page
    SetBusy(bool),

    /// Replace the pending input buffer
    UpdateDraft { text: String },

    /// Empty the pending input buffer
    ClearDraft,

    /// Ask the transport for a reply (spawns as background task)
    RequestReply { text: String },

    /// Ask the transport to reset the conversation (spawns as background task)
    RequestReset,

    /// Push the current snapshot to subscribers
    PublishSnapshot,
}

impl Effect {
    pub fn append(message: Message) -> Self {
        Effect::AppendMessage { message }
    }

    pub fn replace_history(message: Message) -> Self {
        Effect::ReplaceHistory { message }
    }
}
