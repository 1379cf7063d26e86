//! Shared domain types for Botforge.
//!
//! This crate contains the types that flow through the chat pipeline:
//! Bot, Conversation, the inbound ChatRequest, LLM message shapes, and
//! the error enums shared by the core and infrastructure layers.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror, validator.

pub mod bot;
pub mod chat;
pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
