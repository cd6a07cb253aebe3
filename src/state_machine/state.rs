//! Session state types

/// Which operation, if any, is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Ready for user input, no pending operations
    #[default]
    Idle,

    /// Message sent, waiting for the assistant's reply
    AwaitingReply,

    /// Reset requested, waiting for the fresh seed message
    Resetting,
}

impl SessionState {
    /// Busy states block new sends and resets
    pub fn is_busy(self) -> bool {
        !matches!(self, SessionState::Idle)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::AwaitingReply => "awaiting_reply",
            SessionState::Resetting => "resetting",
        }
    }
}
