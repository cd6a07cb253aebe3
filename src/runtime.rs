//! Runtime for the chat session
//!
//! A single task owns the conversation and processes events one at a time.
//! [`SessionHandle`]s send intents to it and read published snapshots.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::SessionRuntime;
use executor::Intent;
pub use traits::*;

use crate::conversation::{ConversationState, ConversationStore};
use crate::state_machine::Event;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, watch};

/// Intents waiting for the runtime before senders are held back
const INTENT_BUFFER: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Session runtime has stopped")]
    Stopped,
}

/// Handle to interact with the running session
#[derive(Clone)]
pub struct SessionHandle {
    intent_tx: mpsc::Sender<Intent>,
    snapshot_rx: watch::Receiver<ConversationState>,
}

impl SessionHandle {
    /// Submit a user message and wait until the runtime has applied it.
    ///
    /// Returns `false` when the message was ignored (blank text, or a
    /// request already in flight). On `true` the published snapshot already
    /// shows the user message and the busy flag.
    pub async fn send(&self, text: impl Into<String>) -> Result<bool, RuntimeError> {
        self.dispatch(Event::user_message(text)).await
    }

    /// Request a conversation reset. Returns `false` when ignored while busy.
    pub async fn reset(&self) -> Result<bool, RuntimeError> {
        self.dispatch(Event::ResetRequested).await
    }

    /// Replace the pending input buffer
    pub async fn update_draft(&self, text: impl Into<String>) -> Result<bool, RuntimeError> {
        self.dispatch(Event::draft_changed(text)).await
    }

    /// Latest published state
    pub fn snapshot(&self) -> ConversationState {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver that is notified on every published change
    pub fn subscribe(&self) -> watch::Receiver<ConversationState> {
        self.snapshot_rx.clone()
    }

    async fn dispatch(&self, event: Event) -> Result<bool, RuntimeError> {
        let (intent, applied) = Intent::new(event);
        self.intent_tx
            .send(intent)
            .await
            .map_err(|_| RuntimeError::Stopped)?;
        applied.await.map_err(|_| RuntimeError::Stopped)
    }
}

/// Build a runtime for `store` without starting it
pub fn session<T: ChatTransport + 'static>(
    transport: Arc<T>,
    store: ConversationStore,
) -> (SessionRuntime<T>, SessionHandle) {
    let (intent_tx, intent_rx) = mpsc::channel(INTENT_BUFFER);
    let (snapshot_tx, snapshot_rx) = watch::channel(store.snapshot());
    let runtime = SessionRuntime::new(store, transport, intent_rx, snapshot_tx);
    (
        runtime,
        SessionHandle {
            intent_tx,
            snapshot_rx,
        },
    )
}

/// Spawn the session runtime and return a handle to it
pub fn start<T: ChatTransport + 'static>(
    transport: Arc<T>,
    store: ConversationStore,
) -> SessionHandle {
    let (runtime, handle) = session(transport, store);
    tokio::spawn(runtime.run());
    handle
}
