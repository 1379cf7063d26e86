//! Service configuration types for Botforge.
//!
//! `ServiceConfig` represents the optional `botforge.toml` that tunes the
//! completion endpoint and per-variant chat limits. Secrets never live here;
//! they come from the environment or CLI flags.

use serde::{Deserialize, Serialize};

/// Top-level configuration file. All fields have defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub llm: LlmSettings,

    #[serde(default)]
    pub chat: ChatSettings,
}

/// Where and how to reach the completion API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Base URL of an OpenAI-compatible API (without `/chat/completions`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Optional sampling temperature; omitted from requests when unset.
    #[serde(default)]
    pub temperature: Option<f64>,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: None,
        }
    }
}

/// Per-variant limits for the chat pipeline.
///
/// The streaming and non-streaming endpoints deliberately differ: streaming
/// forwards the whole stored history with no output ceiling, the JSON reply
/// keeps only the most recent turns and caps output tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSettings {
    /// Most recent turns forwarded by the streaming variant; `None` = all.
    #[serde(default)]
    pub stream_history_limit: Option<usize>,

    /// Most recent turns forwarded by the non-streaming variant.
    #[serde(default = "default_reply_history_limit")]
    pub reply_history_limit: Option<usize>,

    /// Output token ceiling for the non-streaming variant.
    #[serde(default = "default_reply_max_tokens")]
    pub reply_max_tokens: u32,
}

fn default_reply_history_limit() -> Option<usize> {
    Some(10)
}

fn default_reply_max_tokens() -> u32 {
    500
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            stream_history_limit: None,
            reply_history_limit: default_reply_history_limit(),
            reply_max_tokens: default_reply_max_tokens(),
        }
    }
}
