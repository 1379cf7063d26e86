//! Completion provider abstractions for Botforge.
//!
//! - `CompletionProvider`: RPITIT trait for concrete provider implementations
//! - `BoxCompletionProvider`: object-safe wrapper for dynamic dispatch

pub mod box_provider;
pub mod provider;
