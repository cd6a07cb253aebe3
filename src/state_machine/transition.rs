//! Pure state transition function
//!
//! Given the same state and event, `transition` always produces the same
//! new state and effects, with no I/O.

use super::{Effect, Event, SessionState};
use crate::conversation::Message;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Reasons an event is not accepted in the current state.
///
/// A rejected intent leaves the session untouched; callers treat these as
/// no-ops rather than failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A request is already in flight")]
    Busy,
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
pub fn transition(state: SessionState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Sending
        // ============================================================

        (SessionState::Idle, Event::UserMessage { text }) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(TransitionError::EmptyMessage);
            }
            let message = Message::user(trimmed);
            Ok(TransitionResult::new(SessionState::AwaitingReply)
                .with_effect(Effect::append(message))
                .with_effect(Effect::ClearDraft)
                .with_effect(Effect::SetBusy(true))
                .with_effect(Effect::PublishSnapshot)
                .with_effect(Effect::RequestReply { text }))
        }

        (SessionState::AwaitingReply, Event::ReplyReceived { message }) => {
            Ok(TransitionResult::new(SessionState::Idle)
                .with_effect(Effect::SetBusy(false))
                .with_effect(Effect::append(message))
                .with_effect(Effect::PublishSnapshot))
        }

        // ============================================================
        // Resetting
        // ============================================================

        (SessionState::Idle, Event::ResetRequested) => {
            Ok(TransitionResult::new(SessionState::Resetting)
                .with_effect(Effect::SetBusy(true))
                .with_effect(Effect::PublishSnapshot)
                .with_effect(Effect::RequestReset))
        }

        (SessionState::Resetting, Event::ResetCompleted { message }) => {
            Ok(TransitionResult::new(SessionState::Idle)
                .with_effect(Effect::SetBusy(false))
                .with_effect(Effect::replace_history(message))
                .with_effect(Effect::ClearDraft)
                .with_effect(Effect::PublishSnapshot))
        }

        // ============================================================
        // Busy gate
        // ============================================================

        (
            SessionState::AwaitingReply | SessionState::Resetting,
            Event::UserMessage { .. } | Event::ResetRequested,
        ) => Err(TransitionError::Busy),

        // ============================================================
        // Draft edits are accepted in every state
        // ============================================================

        (state, Event::DraftChanged { text }) => Ok(TransitionResult::new(state)
            .with_effect(Effect::UpdateDraft { text })
            .with_effect(Effect::PublishSnapshot)),

        // Settlements that don't match the pending operation
        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "{} while {}",
            event.kind(),
            state.as_str()
        ))),
    }
}
