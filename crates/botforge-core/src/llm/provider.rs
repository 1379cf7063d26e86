//! CompletionProvider trait definition.
//!
//! The core abstraction over the external completion API. Streaming hands
//! back the provider's raw response bytes so the transport can relay them
//! to the caller without re-encoding.

use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;

use botforge_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Raw response body chunks from a streaming completion, in arrival order.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, LlmError>> + Send + 'static>>;

/// Trait for completion API backends.
///
/// Implementations live in botforge-infra (e.g., `OpenAiCompatProvider`).
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;

    /// Open a streaming completion.
    ///
    /// Resolves once the provider has accepted the request (status checked),
    /// before any body chunk is read. Provider-side refusals such as rate
    /// limiting surface here as `Err`, not inside the stream.
    fn stream(
        &self,
        request: CompletionRequest,
    ) -> impl std::future::Future<Output = Result<ByteStream, LlmError>> + Send;
}
