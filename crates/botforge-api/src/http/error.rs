//! Application error type mapping chat failures to HTTP responses.
//!
//! Every error body has the shape `{ "error": "...", "details": ... }`, with
//! `details` omitted when there is nothing to add. Record store failures only
//! reach the server log; the client sees a fixed message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use botforge_types::error::ChatError;
use botforge_types::llm::LlmError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The request body could not be parsed as JSON.
    InvalidBody(String),
    /// Anything the chat pipeline rejected or failed on.
    Chat(ChatError),
    /// No route matched.
    NotFound,
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl AppError {
    /// Status, public message and optional details for this error.
    fn parts(&self) -> (StatusCode, String, Option<Value>) {
        match self {
            AppError::InvalidBody(reason) => (
                StatusCode::BAD_REQUEST,
                "Invalid request body".to_string(),
                Some(Value::String(reason.clone())),
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string(), None),
            AppError::Chat(ChatError::Validation(violations)) => (
                StatusCode::BAD_REQUEST,
                "Invalid request".to_string(),
                serde_json::to_value(violations).ok(),
            ),
            AppError::Chat(ChatError::BotNotFound) => {
                (StatusCode::NOT_FOUND, "Bot not found".to_string(), None)
            }
            AppError::Chat(ChatError::Llm(LlmError::RateLimited)) => (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded. Please try again shortly.".to_string(),
                None,
            ),
            AppError::Chat(ChatError::Llm(LlmError::QuotaExhausted)) => (
                StatusCode::PAYMENT_REQUIRED,
                "AI usage limit reached. Please contact support.".to_string(),
                None,
            ),
            AppError::Chat(ChatError::Llm(LlmError::Upstream { .. })) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI service error".to_string(),
                None,
            ),
            AppError::Chat(ChatError::Llm(LlmError::NotConfigured)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI service is not configured".to_string(),
                None,
            ),
            AppError::Chat(ChatError::Repository(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Record store error".to_string(),
                None,
            ),
            AppError::Chat(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = self.parts();

        match &self {
            AppError::Chat(ChatError::Llm(LlmError::NotConfigured)) => {
                tracing::error!(config_error = true, "Chat request failed: completion API key is not configured");
            }
            // Already logged with status and body by the provider.
            AppError::Chat(ChatError::Llm(LlmError::Upstream { .. })) => {}
            AppError::Chat(e) if status.is_server_error() => {
                tracing::error!(error = %e, "Chat request failed");
            }
            _ => {
                tracing::debug!(%status, error = %message, "Chat request rejected");
            }
        }

        let body = match details {
            Some(details) => json!({ "error": message, "details": details }),
            None => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}
