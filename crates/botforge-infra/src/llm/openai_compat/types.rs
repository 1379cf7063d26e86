//! Chat Completions API wire types.
//!
//! These are provider-specific request/response structures. They are NOT the
//! generic LLM types from botforge-types -- those are provider-agnostic.

use serde::{Deserialize, Serialize};

use botforge_types::llm::{CompletionRequest, Message};

/// Request body for `POST {base}/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionBody<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl<'a> ChatCompletionBody<'a> {
    /// Borrow a generic request; an empty model falls back to `default_model`.
    pub fn new(request: &'a CompletionRequest, default_model: &'a str, stream: bool) -> Self {
        let model = if request.model.is_empty() {
            default_model
        } else {
            request.model.as_str()
        };

        Self {
            model,
            messages: &request.messages,
            stream,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

/// Non-streaming response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if the provider produced one.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_uses_default_model_when_empty() {
        let request = CompletionRequest {
            model: String::new(),
            messages: vec![Message::system("sys"), Message::user("hi")],
            max_tokens: Some(500),
            temperature: None,
            stream: false,
        };
        let json = serde_json::to_value(ChatCompletionBody::new(&request, "gpt-4o-mini", false)).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["max_tokens"], 500);
        assert!(json.get("temperature").is_none());
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_response_without_content() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#,
        )
        .unwrap();
        assert_eq!(response.first_content(), None);

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(empty.first_content(), None);
    }
}
