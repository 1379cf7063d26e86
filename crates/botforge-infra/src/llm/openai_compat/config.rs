//! Configuration for the OpenAI-compatible provider.

use secrecy::SecretString;

use botforge_types::config::LlmSettings;

/// Everything needed to construct an [`super::OpenAiCompatProvider`].
pub struct OpenAiCompatConfig {
    /// Name reported by the provider (e.g. "openai").
    pub provider_name: String,
    /// Base URL without the `/chat/completions` suffix.
    pub base_url: String,
    /// Bearer credential; `None` makes every call fail with `NotConfigured`.
    pub api_key: Option<SecretString>,
    /// Model used when a request leaves `model` empty.
    pub model: String,
}

impl OpenAiCompatConfig {
    pub fn from_settings(settings: &LlmSettings, api_key: Option<SecretString>) -> Self {
        Self {
            provider_name: provider_name_for(&settings.base_url).to_string(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: settings.model.clone(),
        }
    }
}

/// Best-effort provider label from the API host, for logs only.
fn provider_name_for(base_url: &str) -> &'static str {
    if base_url.contains("api.openai.com") {
        "openai"
    } else if base_url.contains("generativelanguage.googleapis.com") {
        "gemini"
    } else if base_url.contains("api.mistral.ai") {
        "mistral"
    } else if base_url.contains("openrouter.ai") {
        "openrouter"
    } else {
        "openai-compatible"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_trims_base_url() {
        let settings = LlmSettings {
            base_url: "https://api.openai.com/v1/".to_string(),
            ..LlmSettings::default()
        };
        let config = OpenAiCompatConfig::from_settings(&settings, None);
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.provider_name, "openai");
        assert_eq!(config.model, "gpt-4o-mini");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_unknown_host_is_generic() {
        assert_eq!(provider_name_for("http://localhost:11434/v1"), "openai-compatible");
        assert_eq!(provider_name_for("https://api.mistral.ai/v1"), "mistral");
    }
}
