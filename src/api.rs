//! HTTP surface for the chat page
//!
//! Serves the page shell, accepts user intents and streams conversation
//! snapshots to the browser.

mod assets;
mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::render::ContentRenderer;
use crate::runtime::SessionHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub session: SessionHandle,
    pub renderer: ContentRenderer,
}

impl AppState {
    pub fn new(session: SessionHandle, renderer: ContentRenderer) -> Self {
        Self { session, renderer }
    }
}
