//! Session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.
//! The runtime owns the conversation store and executes the effects a
//! transition produces.

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::SessionState;
pub use transition::transition;
