//! Record store trait definitions (ports).
//!
//! The record store is an external collaborator reached through simple
//! lookups by identifier. Implementations live in botforge-infra.

pub mod bot;
pub mod box_store;
pub mod conversation;
