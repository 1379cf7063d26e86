//! HTTP transport for the chat endpoint.
//!
//! Axum router exposing the streaming and JSON chat variants under the
//! hosted-function paths (`/functions/v1/...`) and `/api/v1/chat`, with
//! permissive CORS and a `{ error, details? }` error body.

pub mod cors;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;

#[cfg(test)]
pub(crate) mod test_support;
