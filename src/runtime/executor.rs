//! Session runtime executor

use super::traits::ChatTransport;
use crate::conversation::{ConversationState, ConversationStore};
use crate::state_machine::{transition, Effect, Event, SessionState};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

/// A user intent and the channel told whether it was applied
pub struct Intent {
    event: Event,
    applied: oneshot::Sender<bool>,
}

impl Intent {
    pub fn new(event: Event) -> (Self, oneshot::Receiver<bool>) {
        let (applied, rx) = oneshot::channel();
        (Self { event, applied }, rx)
    }
}

/// Owns the conversation store and applies effects for one chat session
pub struct SessionRuntime<T: ChatTransport + 'static> {
    state: SessionState,
    store: ConversationStore,
    transport: Arc<T>,
    /// User intents from session handles
    intent_rx: mpsc::Receiver<Intent>,
    /// Transport settlements from spawned requests
    settle_rx: mpsc::Receiver<Event>,
    settle_tx: mpsc::Sender<Event>,
    snapshot_tx: watch::Sender<ConversationState>,
}

impl<T: ChatTransport + 'static> SessionRuntime<T> {
    pub fn new(
        store: ConversationStore,
        transport: Arc<T>,
        intent_rx: mpsc::Receiver<Intent>,
        snapshot_tx: watch::Sender<ConversationState>,
    ) -> Self {
        let (settle_tx, settle_rx) = mpsc::channel(8);
        Self {
            state: SessionState::Idle,
            store,
            transport,
            intent_rx,
            settle_rx,
            settle_tx,
            snapshot_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(messages = self.store.message_count(), "Starting session runtime");

        // Process events in a loop; stop once every handle is gone
        loop {
            tokio::select! {
                intent = self.intent_rx.recv() => match intent {
                    Some(Intent { event, applied }) => {
                        let accepted = self.process_event(event);
                        // The caller may have stopped waiting
                        let _ = applied.send(accepted);
                    }
                    None => break,
                },
                Some(event) = self.settle_rx.recv() => {
                    self.process_event(event);
                }
            }
        }

        tracing::info!(state = self.state.as_str(), "Session runtime stopped");
    }

    /// Apply one event; returns false when the transition rejected it.
    /// Synchronous effects and the snapshot publish finish before returning.
    fn process_event(&mut self, event: Event) -> bool {
        let kind = event.kind();

        // Pure state transition
        let result = match transition(self.state, event) {
            Ok(r) => r,
            Err(e) => {
                // Rejected intents leave the session untouched
                tracing::debug!(
                    event = kind,
                    state = self.state.as_str(),
                    reason = %e,
                    "Event ignored"
                );
                return false;
            }
        };

        tracing::debug!(
            event = kind,
            from = self.state.as_str(),
            to = result.new_state.as_str(),
            "State transition"
        );
        self.state = result.new_state;

        for effect in result.effects {
            self.execute_effect(effect);
        }
        debug_assert_eq!(self.store.is_busy(), self.state.is_busy());
        true
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendMessage { message } => self.store.append(message),
            Effect::ReplaceHistory { message } => self.store.replace_all(message),
            Effect::SetBusy(busy) => self.store.set_busy(busy),
            Effect::UpdateDraft { text } => self.store.set_draft(text),
            Effect::ClearDraft => self.store.clear_draft(),
            Effect::PublishSnapshot => self.publish(),

            Effect::RequestReply { text } => {
                // Spawn transport call as background task
                let transport = self.transport.clone();
                let settle_tx = self.settle_tx.clone();
                tokio::spawn(async move {
                    tracing::info!(text_len = text.len(), "Requesting reply (background)");
                    let message = transport.send_message(&text).await;
                    let _ = settle_tx.send(Event::ReplyReceived { message }).await;
                });
            }

            Effect::RequestReset => {
                let transport = self.transport.clone();
                let settle_tx = self.settle_tx.clone();
                tokio::spawn(async move {
                    tracing::info!("Requesting conversation reset (background)");
                    let message = transport.reset_conversation().await;
                    let _ = settle_tx.send(Event::ResetCompleted { message }).await;
                });
            }
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.store.snapshot());
    }
}
