//! Chat endpoints.
//!
//! - `POST /functions/v1/bot-chat` (also `/api/v1/chat/stream`): relays the
//!   completion API's server-sent event stream to the caller byte for byte.
//! - `POST /functions/v1/chat-with-bot` (also `/api/v1/chat`): waits for the
//!   full completion and answers `{ "response": "..." }`.
//!
//! Body for both: `{ "botId": uuid, "message": string, "conversationId"?: uuid }`.

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;

use botforge_types::chat::{ChatReply, ChatRequest};

use crate::http::error::AppError;
use crate::http::extractors::json::ChatJson;
use crate::state::AppState;

/// POST /functions/v1/bot-chat -- streaming chat.
///
/// Errors before the upstream accepted the request are returned as JSON.
/// Once streaming, the upstream body is passed through untouched; when the
/// client disconnects the body is dropped, which closes the upstream
/// connection.
pub async fn stream_chat(
    State(state): State<AppState>,
    ChatJson(request): ChatJson<ChatRequest>,
) -> Result<Response, AppError> {
    let stream = state.chat.open_stream(request).await?;

    let mut response = Response::new(Body::from_stream(stream));
    *response.status_mut() = StatusCode::OK;
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/event-stream"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    Ok(response)
}

/// POST /functions/v1/chat-with-bot -- single JSON reply.
pub async fn reply_chat(
    State(state): State<AppState>,
    ChatJson(request): ChatJson<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let reply = state.chat.reply(request).await?;
    Ok(Json(reply))
}
