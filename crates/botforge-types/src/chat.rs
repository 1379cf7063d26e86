//! Inbound chat request shape and its validation.
//!
//! The wire body is camelCase JSON:
//! `{ "botId": "<uuid>", "message": "...", "conversationId": "<uuid>" }`.
//! Missing fields deserialize to empty values so they surface as field
//! violations instead of parse failures.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::bot::BotId;
use crate::conversation::ConversationId;

/// Longest accepted user message, in characters, after trimming.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Raw chat request as received from the widget.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_bot_id"))]
    pub bot_id: String,

    #[serde(default)]
    #[validate(custom(function = "validate_message"))]
    pub message: String,

    #[serde(default)]
    #[validate(custom(function = "validate_conversation_id"))]
    pub conversation_id: Option<String>,
}

/// A request that passed validation, with parsed identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidChatRequest {
    pub bot_id: BotId,
    /// Trimmed user message, 1..=2000 characters.
    pub message: String,
    pub conversation_id: Option<ConversationId>,
}

/// One field-level validation failure, reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Wire (camelCase) field name.
    pub field: String,
    /// Machine-readable code, e.g. `required`, `too_long`, `invalid_uuid`.
    pub code: String,
    pub message: String,
}

/// Body of the non-streaming reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

impl ChatRequest {
    pub fn new(bot_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            bot_id: bot_id.into(),
            message: message.into(),
            conversation_id: None,
        }
    }

    pub fn with_conversation(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }

    /// Check every field and convert into a [`ValidChatRequest`].
    ///
    /// Violations are returned sorted by field name so responses are stable.
    pub fn validated(self) -> Result<ValidChatRequest, Vec<FieldViolation>> {
        if let Err(errors) = self.validate() {
            let mut violations: Vec<FieldViolation> = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errs)| {
                    let field = wire_field_name(field.as_ref()).to_string();
                    errs.iter().map(move |e| FieldViolation {
                        field: field.clone(),
                        code: e.code.to_string(),
                        message: e
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string()),
                    })
                })
                .collect();
            violations.sort_by(|a, b| a.field.cmp(&b.field).then(a.code.cmp(&b.code)));
            return Err(violations);
        }

        // The custom validators above already proved these parse.
        let bot_id = self
            .bot_id
            .trim()
            .parse::<BotId>()
            .map_err(|_| vec![violation("botId", "invalid_uuid", "botId must be a UUID")])?;
        let conversation_id = match present(self.conversation_id.as_deref()) {
            Some(raw) => Some(raw.parse::<ConversationId>().map_err(|_| {
                vec![violation(
                    "conversationId",
                    "invalid_uuid",
                    "conversationId must be a UUID",
                )]
            })?),
            None => None,
        };

        Ok(ValidChatRequest {
            bot_id,
            message: self.message.trim().to_string(),
            conversation_id,
        })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn wire_field_name(field: &str) -> &str {
    match field {
        "bot_id" | "botId" => "botId",
        "conversation_id" | "conversationId" => "conversationId",
        other => other,
    }
}

fn violation(field: &str, code: &str, message: &str) -> FieldViolation {
    FieldViolation {
        field: field.to_string(),
        code: code.to_string(),
        message: message.to_string(),
    }
}

fn error_with(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_bot_id(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(error_with("required", "botId is required"));
    }
    if !is_hyphenated_uuid(value) {
        return Err(error_with("invalid_uuid", "botId must be a UUID"));
    }
    Ok(())
}

fn validate_message(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error_with("required", "message must not be empty"));
    }
    if trimmed.chars().count() > MAX_MESSAGE_CHARS {
        return Err(error_with(
            "too_long",
            "message must be at most 2000 characters",
        ));
    }
    Ok(())
}

fn validate_conversation_id(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    if !is_hyphenated_uuid(value) {
        return Err(error_with("invalid_uuid", "conversationId must be a UUID"));
    }
    Ok(())
}

/// Only the 8-4-4-4-12 hex form; simple, braced and URN forms are rejected.
fn is_hyphenated_uuid(value: &str) -> bool {
    value.len() == 36
        && value.char_indices().all(|(i, c)| match i {
            8 | 13 | 18 | 23 => c == '-',
            _ => c.is_ascii_hexdigit(),
        })
}
