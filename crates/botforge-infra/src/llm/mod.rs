//! Completion provider implementations.
//!
//! Contains the concrete [`CompletionProvider`](botforge_core::llm::provider::CompletionProvider)
//! for OpenAI-compatible chat completion APIs, plus a factory that builds a
//! boxed provider from service settings.

pub mod openai_compat;

use secrecy::SecretString;

use botforge_core::llm::box_provider::BoxCompletionProvider;
use botforge_types::config::LlmSettings;
use botforge_types::llm::LlmError;

use self::openai_compat::OpenAiCompatProvider;
use self::openai_compat::config::OpenAiCompatConfig;

/// Build the completion provider described by `settings`.
///
/// A missing `api_key` is not an error here: the provider still starts and
/// answers every call with [`LlmError::NotConfigured`].
pub fn create_provider(
    settings: &LlmSettings,
    api_key: Option<SecretString>,
) -> Result<BoxCompletionProvider, LlmError> {
    if api_key.is_none() {
        tracing::warn!(config_error = true, "No completion API key configured; chat requests will fail");
    }
    let config = OpenAiCompatConfig::from_settings(settings, api_key);
    Ok(BoxCompletionProvider::new(OpenAiCompatProvider::new(config)?))
}
