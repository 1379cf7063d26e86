use thiserror::Error;

use crate::chat::FieldViolation;
use crate::llm::LlmError;

/// Errors from record store operations (used by trait definitions in botforge-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record store connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("malformed record: {0}")]
    Decode(String),
}

/// Everything that can stop a chat request.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid request ({} violation(s))", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("bot not found")]
    BotNotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}
