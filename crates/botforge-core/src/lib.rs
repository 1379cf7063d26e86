//! Chat pipeline and port trait definitions for Botforge.
//!
//! This crate defines the "ports" (record store and completion provider
//! traits) that the infrastructure layer implements, and the chat pipeline
//! that drives them. It depends only on `botforge-types` -- never on
//! `botforge-infra` or any HTTP/database crate.

pub mod chat;
pub mod llm;
pub mod repository;
