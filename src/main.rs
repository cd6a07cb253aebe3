//! Assistant chat - browser chat client for a remote assistant service
//!
//! Serves a single-page chat, keeps the session's conversation in memory
//! and forwards messages to the assistant service over HTTP.

mod api;
mod config;
mod conversation;
mod render;
mod runtime;
mod state_machine;
mod transport;

use api::{create_router, AppState};
use config::ChatConfig;
use conversation::ConversationStore;
use render::ContentRenderer;
use runtime::ServiceTransport;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transport::{HttpChatService, LoggingService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "assistant_chat=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = ChatConfig::from_env()?;

    // Assistant service client
    let service = HttpChatService::new(&config.api_url, config.request_timeout)?;
    let service = LoggingService::new(Arc::new(service));
    tracing::info!(
        api_url = %config.api_url,
        timeout_secs = config.request_timeout.as_secs(),
        "Assistant service configured"
    );

    // Session runtime
    let session = runtime::start(
        Arc::new(ServiceTransport::new(service)),
        ConversationStore::with_welcome(config.welcome_message.as_str()),
    );

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let renderer = ContentRenderer::new(config.embed);
    let app = create_router(AppState::new(session, renderer))
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.listen_addr();
    tracing::info!("Assistant chat listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
