//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::sse::snapshot_stream;
use super::types::{ChatRequest, ConversationView, DraftRequest, ErrorResponse, QueuedResponse};
use super::AppState;
use crate::runtime::RuntimeError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Page shell
        .route("/", get(serve_page))
        // Static assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_static))
        // Conversation snapshots
        .route("/api/conversation", get(get_conversation))
        .route("/api/conversation/stream", get(stream_conversation))
        // User intents
        .route("/api/chat", post(send_chat))
        .route("/api/reset", post(reset_chat))
        .route("/api/draft", post(update_draft))
        .with_state(state)
}

// ============================================================
// Page
// ============================================================

async fn serve_page() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - page shell not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Snapshots
// ============================================================

async fn get_conversation(State(state): State<AppState>) -> Json<ConversationView> {
    let snapshot = state.session.snapshot();
    Json(ConversationView::new(&snapshot, &state.renderer))
}

async fn stream_conversation(State(state): State<AppState>) -> impl IntoResponse {
    snapshot_stream(state.session.subscribe(), state.renderer)
}

// ============================================================
// Intents
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    let accepted = state.session.send(req.text).await?;
    Ok(Json(QueuedResponse::queued(accepted)))
}

async fn reset_chat(State(state): State<AppState>) -> Result<Json<QueuedResponse>, AppError> {
    let accepted = state.session.reset().await?;
    Ok(Json(QueuedResponse::queued(accepted)))
}

async fn update_draft(
    State(state): State<AppState>,
    Json(req): Json<DraftRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    let accepted = state.session.update_draft(req.text).await?;
    Ok(Json(QueuedResponse::queued(accepted)))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    Unavailable(String),
}

impl From<RuntimeError> for AppError {
    fn from(e: RuntimeError) -> Self {
        tracing::error!(error = %e, "Intent not delivered");
        AppError::Unavailable(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
