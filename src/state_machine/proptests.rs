//! Property-based tests for the state machine
//!
//! Random event sequences are pushed through `transition` and the effects
//! applied to a real store, the same way the executor does, minus I/O.

use super::transition::TransitionError;
use super::*;
use crate::conversation::{ConversationStore, Message};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

/// Applies state-mutating effects and counts the rest
struct Simulator {
    state: SessionState,
    store: ConversationStore,
    requests: usize,
}

impl Simulator {
    fn new() -> Self {
        Self {
            state: SessionState::Idle,
            store: ConversationStore::with_welcome("welcome"),
            requests: 0,
        }
    }

    fn apply(&mut self, event: Event) -> Result<(), TransitionError> {
        let result = transition(self.state, event)?;
        self.state = result.new_state;
        for effect in result.effects {
            match effect {
                Effect::AppendMessage { message } => self.store.append(message),
                Effect::ReplaceHistory { message } => self.store.replace_all(message),
                Effect::SetBusy(busy) => self.store.set_busy(busy),
                Effect::UpdateDraft { text } => self.store.set_draft(text),
                Effect::ClearDraft => self.store.clear_draft(),
                Effect::RequestReply { .. } | Effect::RequestReset => self.requests += 1,
                Effect::PublishSnapshot => {}
            }
        }
        Ok(())
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-zA-Z0-9 ]{1,40}",
        1 => "[ \t\n]{0,5}",
    ]
}

fn arb_message() -> impl Strategy<Value = Message> {
    arb_text().prop_map(Message::assistant)
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_text().prop_map(Event::user_message),
        Just(Event::ResetRequested),
        arb_text().prop_map(Event::draft_changed),
        arb_message().prop_map(|message| Event::ReplyReceived { message }),
        arb_message().prop_map(|message| Event::ResetCompleted { message }),
    ]
}

fn arb_state() -> impl Strategy<Value = SessionState> {
    prop_oneof![
        Just(SessionState::Idle),
        Just(SessionState::AwaitingReply),
        Just(SessionState::Resetting),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_history_never_empty(events in proptest::collection::vec(arb_event(), 0..60)) {
        let mut sim = Simulator::new();
        for event in events {
            let _ = sim.apply(event);
            prop_assert!(sim.store.message_count() >= 1);
        }
    }

    #[test]
    fn prop_busy_flag_tracks_state(events in proptest::collection::vec(arb_event(), 0..60)) {
        let mut sim = Simulator::new();
        for event in events {
            let _ = sim.apply(event);
            prop_assert_eq!(sim.store.is_busy(), sim.state.is_busy());
        }
    }

    #[test]
    fn prop_at_most_one_request_in_flight(events in proptest::collection::vec(arb_event(), 0..60)) {
        let mut sim = Simulator::new();
        let mut settled = 0usize;
        for event in events {
            let settles = matches!(event, Event::ReplyReceived { .. } | Event::ResetCompleted { .. });
            if sim.apply(event).is_ok() && settles {
                settled += 1;
            }
            let in_flight = sim.requests - settled;
            prop_assert!(in_flight <= 1);
            prop_assert_eq!(in_flight == 1, sim.state.is_busy());
        }
    }

    #[test]
    fn prop_accepted_message_adds_exactly_one(
        events in proptest::collection::vec(arb_event(), 0..30),
        text in arb_text(),
    ) {
        let mut sim = Simulator::new();
        for event in events {
            let _ = sim.apply(event);
        }
        let before = sim.store.message_count();
        let was_busy = sim.state.is_busy();
        let accepted = sim.apply(Event::user_message(text.clone())).is_ok();

        prop_assert_eq!(accepted, !was_busy && !text.trim().is_empty());
        if accepted {
            prop_assert_eq!(sim.store.message_count(), before + 1);
            prop_assert_eq!(sim.store.messages().last(), Some(&Message::user(text.trim())));
            prop_assert_eq!(sim.store.draft(), "");
        } else {
            prop_assert_eq!(sim.store.message_count(), before);
        }
    }

    #[test]
    fn prop_reset_leaves_single_message(
        events in proptest::collection::vec(arb_event(), 0..30),
        seed in arb_message(),
    ) {
        let mut sim = Simulator::new();
        for event in events {
            let _ = sim.apply(event);
        }
        if sim.state.is_busy() {
            return Ok(());
        }

        sim.apply(Event::ResetRequested).unwrap();
        sim.apply(Event::ResetCompleted { message: seed.clone() }).unwrap();

        prop_assert_eq!(sim.store.messages(), &[seed][..]);
        prop_assert_eq!(sim.store.draft(), "");
        prop_assert!(!sim.store.is_busy());
    }

    #[test]
    fn prop_rejected_events_change_nothing(
        events in proptest::collection::vec(arb_event(), 0..30),
        event in arb_event(),
    ) {
        let mut sim = Simulator::new();
        for event in events {
            let _ = sim.apply(event);
        }
        let state = sim.state;
        let snapshot = sim.store.snapshot();
        let requests = sim.requests;

        if sim.apply(event).is_err() {
            prop_assert_eq!(sim.state, state);
            prop_assert_eq!(sim.store.snapshot(), snapshot);
            prop_assert_eq!(sim.requests, requests);
        }
    }

    #[test]
    fn prop_draft_accepted_in_any_state(state in arb_state(), text in arb_text()) {
        let result = transition(state, Event::draft_changed(text)).unwrap();
        prop_assert_eq!(result.new_state, state);
        let requests_transport = result
            .effects
            .iter()
            .any(|e| matches!(e, Effect::RequestReply { .. } | Effect::RequestReset));
        prop_assert!(!requests_transport, "draft change requested the transport");
    }
}
