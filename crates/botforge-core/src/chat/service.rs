//! Chat service: the request -> completion pipeline.
//!
//! ChatService validates an inbound request, loads the bot and (optionally)
//! the prior conversation from the record store, composes the system prompt,
//! and calls the completion provider. It performs no writes.
//!
//! Every step is strictly ordered; a failed step prevents all later ones:
//! validate -> bot lookup -> conversation lookup -> prompt -> provider call.

use botforge_types::bot::Bot;
use botforge_types::chat::{ChatReply, ChatRequest, ValidChatRequest};
use botforge_types::config::ChatSettings;
use botforge_types::conversation::Turn;
use botforge_types::error::ChatError;
use botforge_types::llm::CompletionRequest;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::chat::{context, prompt};
use crate::llm::provider::{ByteStream, CompletionProvider};
use crate::repository::bot::BotRepository;
use crate::repository::conversation::ConversationRepository;

/// Returned by the reply variant when the provider produced no text.
pub const FALLBACK_REPLY: &str = "I'm sorry, I couldn't generate a response. Please try again.";

/// Orchestrates one chat request against explicitly injected collaborators.
///
/// Generic over the record store and the completion provider so tests can
/// substitute fakes; the api crate pins both to boxed trait objects.
pub struct ChatService<S, P> {
    store: S,
    provider: P,
    model: String,
    temperature: Option<f64>,
    settings: ChatSettings,
}

impl<S, P> ChatService<S, P>
where
    S: BotRepository + ConversationRepository,
    P: CompletionProvider,
{
    /// Create a service; an empty `model` lets the provider pick its default.
    pub fn new(store: S, provider: P, model: impl Into<String>, settings: ChatSettings) -> Self {
        Self {
            store,
            provider,
            model: model.into(),
            temperature: None,
            settings,
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Streaming variant.
    ///
    /// Resolves once the provider accepted the request; the returned stream
    /// yields the provider's raw response bytes for verbatim relay.
    pub async fn open_stream(&self, request: ChatRequest) -> Result<ByteStream, ChatError> {
        let request = request.validated().map_err(ChatError::Validation)?;

        let span = info_span!(
            "chat",
            gen_ai.operation.name = "chat",
            gen_ai.agent.id = %request.bot_id,
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %self.model,
            gen_ai.request.stream = true,
        );

        async {
            let (bot, history) = self.load_context(&request).await?;

            let system = prompt::system_prompt(&bot);
            let messages = context::assemble_messages(
                &system,
                &history,
                &request.message,
                self.settings.stream_history_limit,
            );
            debug!(messages = messages.len(), "Assembled streaming context");

            let completion = CompletionRequest {
                model: self.model.clone(),
                messages,
                max_tokens: None,
                temperature: self.temperature,
                stream: true,
            };

            let stream = self.provider.stream(completion).await?;
            info!(bot = %bot.name, "Completion stream opened");
            Ok::<_, ChatError>(stream)
        }
        .instrument(span)
        .await
    }

    /// Non-streaming variant: bounded history, output ceiling, templated prompt.
    pub async fn reply(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        let request = request.validated().map_err(ChatError::Validation)?;

        let span = info_span!(
            "chat",
            gen_ai.operation.name = "chat",
            gen_ai.agent.id = %request.bot_id,
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %self.model,
            gen_ai.request.max_tokens = self.settings.reply_max_tokens,
            gen_ai.request.stream = false,
        );

        async {
            let (bot, history) = self.load_context(&request).await?;

            let system = prompt::templated_system_prompt(&bot);
            let messages = context::assemble_messages(
                &system,
                &history,
                &request.message,
                self.settings.reply_history_limit,
            );

            let completion = CompletionRequest {
                model: self.model.clone(),
                messages,
                max_tokens: Some(self.settings.reply_max_tokens),
                temperature: self.temperature,
                stream: false,
            };

            let response = self.provider.complete(&completion).await?;
            info!(
                gen_ai.usage.input_tokens = response.usage.input_tokens,
                gen_ai.usage.output_tokens = response.usage.output_tokens,
                "Completion received"
            );

            let text = response
                .content
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| {
                    warn!("Provider returned an empty completion");
                    FALLBACK_REPLY.to_string()
                });

            Ok::<_, ChatError>(ChatReply { response: text })
        }
        .instrument(span)
        .await
    }

    /// Load the bot (required) and the conversation history (best effort).
    async fn load_context(&self, request: &ValidChatRequest) -> Result<(Bot, Vec<Turn>), ChatError> {
        let bot = self
            .store
            .get_bot(&request.bot_id)
            .await?
            .ok_or(ChatError::BotNotFound)?;

        let Some(conversation_id) = request.conversation_id else {
            return Ok((bot, Vec::new()));
        };

        // A missing or unreadable conversation never fails the request.
        let history = match self.store.get_conversation(&conversation_id).await {
            Ok(Some(conversation)) => conversation.turns,
            Ok(None) => {
                debug!(%conversation_id, "Conversation not found, continuing without history");
                Vec::new()
            }
            Err(e) => {
                warn!(%conversation_id, error = %e, "Conversation lookup failed, continuing without history");
                Vec::new()
            }
        };

        Ok((bot, history))
    }
}
