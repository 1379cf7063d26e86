//! OpenAI-compatible completion provider.
//!
//! A single [`OpenAiCompatProvider`] talks to any service exposing the Chat
//! Completions protocol (OpenAI, Gemini's compatibility endpoint, Mistral,
//! OpenRouter, local gateways) via a configurable base URL.
//!
//! Streaming does not parse server-sent events: the response body is handed
//! back as raw bytes so callers can relay it verbatim.

pub mod config;
pub mod types;

use futures_util::TryStreamExt;
use secrecy::{ExposeSecret, SecretString};

use botforge_core::llm::provider::{ByteStream, CompletionProvider};
use botforge_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};

use self::config::OpenAiCompatConfig;
use self::types::{ChatCompletionBody, ChatCompletionResponse};

/// Provider for any OpenAI-compatible Chat Completions API.
///
/// Does NOT derive Debug; the credential is a [`SecretString`] and is only
/// exposed when building the `Authorization` header.
pub struct OpenAiCompatProvider {
    client: reqwest::Client,
    provider_name: String,
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
}

impl OpenAiCompatProvider {
    pub fn new(config: OpenAiCompatConfig) -> Result<Self, LlmError> {
        // No request timeout: a call lasts as long as the provider keeps it open.
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            provider_name: config.provider_name,
            base_url: config.base_url,
            api_key: config.api_key,
            model: config.model,
        })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// POST the request and check the status. The body is not read on success.
    async fn send(
        &self,
        request: &CompletionRequest,
        stream: bool,
    ) -> Result<reqwest::Response, LlmError> {
        let api_key = self.api_key.as_ref().ok_or(LlmError::NotConfigured)?;
        let body = ChatCompletionBody::new(request, &self.model, stream);

        let response = self
            .client
            .post(self.url())
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        let err = map_error_status(status.as_u16(), error_body);
        match &err {
            LlmError::Upstream { status, body } => {
                tracing::error!(provider = %self.provider_name, status, body = %body, "Completion API error");
            }
            other => {
                tracing::warn!(provider = %self.provider_name, error = %other, "Completion API refused request");
            }
        }
        Err(err)
    }
}

/// Classify a non-success status from the completion API.
///
/// 429 is a rate limit unless the body names `insufficient_quota`, which
/// some providers return instead of 402 when billing runs out.
pub fn map_error_status(status: u16, body: String) -> LlmError {
    match status {
        429 if body.contains("insufficient_quota") => LlmError::QuotaExhausted,
        429 => LlmError::RateLimited,
        402 => LlmError::QuotaExhausted,
        _ => LlmError::Upstream { status, body },
    }
}

impl CompletionProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let response = self.send(request, false).await?;

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        let usage = parsed.usage.clone().unwrap_or_default();
        Ok(CompletionResponse {
            content: parsed.first_content().map(str::to_string),
            model: parsed.model.unwrap_or_else(|| self.model.clone()),
            usage: Usage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            },
        })
    }

    async fn stream(&self, request: CompletionRequest) -> Result<ByteStream, LlmError> {
        let response = self.send(&request, true).await?;
        let bytes = response
            .bytes_stream()
            .map_err(|e| LlmError::Stream(e.to_string()));
        Ok(Box::pin(bytes))
    }
}
