//! Axum router configuration with middleware.
//!
//! Chat routes are mounted twice: under the hosted-function paths the widget
//! already calls, and under `/api/v1/chat` for direct integrations.
//! Middleware: CORS (outermost, answers every `OPTIONS`), request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::http::cors::cors_layer;
use crate::http::error::AppError;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/functions/v1/bot-chat", post(handlers::chat::stream_chat))
        .route("/functions/v1/chat-with-bot", post(handlers::chat::reply_chat))
        .route("/api/v1/chat/stream", post(handlers::chat::stream_chat))
        .route("/api/v1/chat", post(handlers::chat::reply_chat))
        .route("/health", get(handlers::health::health_check))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
