//! Server-Sent Events support

use super::types::ConversationView;
use crate::conversation::ConversationState;
use crate::render::ContentRenderer;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

/// Stream the current snapshot, then one event per published change.
///
/// Intermediate snapshots may be skipped when the client is slow; the
/// latest one always arrives.
pub fn snapshot_stream(
    snapshot_rx: watch::Receiver<ConversationState>,
    renderer: ContentRenderer,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = WatchStream::new(snapshot_rx)
        .map(move |state| Ok(snapshot_event(&state, &renderer)));

    Sse::new(events).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn snapshot_event(state: &ConversationState, renderer: &ContentRenderer) -> Event {
    let view = ConversationView::new(state, renderer);
    let data = serde_json::to_string(&view).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to serialize snapshot");
        "{}".to_string()
    });
    Event::default().event("snapshot").data(data)
}
