//! BoxCompletionProvider -- object-safe dynamic dispatch wrapper for CompletionProvider.
//!
//! 1. Define an object-safe `CompletionProviderDyn` trait with boxed futures
//! 2. Blanket-impl `CompletionProviderDyn` for all `T: CompletionProvider`
//! 3. `BoxCompletionProvider` wraps `Box<dyn CompletionProviderDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use botforge_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use super::provider::{ByteStream, CompletionProvider};

/// Object-safe version of [`CompletionProvider`] with boxed futures.
pub trait CompletionProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>>;

    fn stream_boxed(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ByteStream, LlmError>> + Send + '_>>;
}

impl<T: CompletionProvider> CompletionProviderDyn for T {
    fn name(&self) -> &str {
        CompletionProvider::name(self)
    }

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>> {
        Box::pin(self.complete(request))
    }

    fn stream_boxed(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ByteStream, LlmError>> + Send + '_>> {
        Box::pin(self.stream(request))
    }
}

/// Type-erased completion provider.
///
/// `CompletionProvider` uses RPITIT and cannot be a trait object directly;
/// this wrapper restores dynamic dispatch and itself implements the trait.
pub struct BoxCompletionProvider {
    inner: Box<dyn CompletionProviderDyn>,
}

impl BoxCompletionProvider {
    /// Wrap a concrete `CompletionProvider` in a type-erased box.
    pub fn new<T: CompletionProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }
}

impl CompletionProvider for BoxCompletionProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.inner.complete_boxed(request).await
    }

    async fn stream(&self, request: CompletionRequest) -> Result<ByteStream, LlmError> {
        self.inner.stream_boxed(request).await
    }
}
