//! In-memory fakes for router tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use bytes::Bytes;
use futures_util::StreamExt;

use botforge_core::chat::service::ChatService;
use botforge_core::llm::box_provider::BoxCompletionProvider;
use botforge_core::llm::provider::{ByteStream, CompletionProvider};
use botforge_core::repository::bot::BotRepository;
use botforge_core::repository::box_store::BoxRecordStore;
use botforge_core::repository::conversation::ConversationRepository;
use botforge_types::bot::{Bot, BotId, BotTemplate, KnowledgeBase};
use botforge_types::config::ChatSettings;
use botforge_types::conversation::{Conversation, ConversationId, Turn};
use botforge_types::error::RepositoryError;
use botforge_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use crate::http::router::build_router;
use crate::state::AppState;

/// Chunks the fake provider streams back, in order.
pub const SSE_CHUNKS: [&str; 3] = [
    "data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n\n",
    "data: {\"choices\":[{\"delta\":{\"content\":\" there\"}}]}\n\n",
    "data: [DONE]\n\n",
];

/// The only chunk a held-open upstream sends before going quiet.
pub const HELD_CHUNK: &str = "data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n\n";

/// Internal detail carried by a failing bot lookup; must never reach a client.
pub const STORE_FAILURE_DETAIL: &str =
    "HTTP 500 Internal Server Error: permission denied for table internal_schema.bots";

#[derive(Default)]
struct Records {
    bots: Mutex<HashMap<BotId, Bot>>,
    conversations: Mutex<HashMap<ConversationId, Conversation>>,
    calls: AtomicUsize,
    fail_bot_lookups: AtomicBool,
}

#[derive(Clone, Default)]
struct FakeStore(Arc<Records>);

impl BotRepository for FakeStore {
    async fn get_bot(&self, id: &BotId) -> Result<Option<Bot>, RepositoryError> {
        self.0.calls.fetch_add(1, Ordering::SeqCst);
        if self.0.fail_bot_lookups.load(Ordering::SeqCst) {
            return Err(RepositoryError::Query(STORE_FAILURE_DETAIL.to_string()));
        }
        Ok(self.0.bots.lock().unwrap().get(id).cloned())
    }
}

impl ConversationRepository for FakeStore {
    async fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        self.0.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.0.conversations.lock().unwrap().get(id).cloned())
    }
}

#[derive(Clone, Copy)]
enum Upstream {
    /// Streams `SSE_CHUNKS` and ends.
    Chunks,
    /// Sends `HELD_CHUNK`, then never sends or closes again.
    HoldOpen,
    /// Refuses every call.
    Fail(fn() -> LlmError),
}

/// Sets its flag when the upstream stream it lives in is dropped.
struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[derive(Clone)]
struct FakeProvider {
    upstream: Upstream,
    sent: Arc<Mutex<Vec<CompletionRequest>>>,
    stream_dropped: Arc<AtomicBool>,
}

impl CompletionProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.sent.lock().unwrap().push(request.clone());
        if let Upstream::Fail(make) = self.upstream {
            return Err(make());
        }
        Ok(CompletionResponse {
            content: Some("Hi there".to_string()),
            ..Default::default()
        })
    }

    async fn stream(&self, request: CompletionRequest) -> Result<ByteStream, LlmError> {
        self.sent.lock().unwrap().push(request);
        match self.upstream {
            Upstream::Fail(make) => Err(make()),
            Upstream::Chunks => {
                let chunks: Vec<Result<Bytes, LlmError>> = SSE_CHUNKS
                    .iter()
                    .map(|c| Ok(Bytes::from_static(c.as_bytes())))
                    .collect();
                Ok(Box::pin(futures_util::stream::iter(chunks)))
            }
            Upstream::HoldOpen => {
                let flag = DropFlag(self.stream_dropped.clone());
                let stream = futures_util::stream::once(async {
                    Ok::<_, LlmError>(Bytes::from_static(HELD_CHUNK.as_bytes()))
                })
                .chain(futures_util::stream::pending())
                .map(move |chunk| {
                    let _alive = &flag;
                    chunk
                });
                Ok(Box::pin(stream))
            }
        }
    }
}

/// App state over fakes, with handles to inspect what the pipeline did.
pub struct Harness {
    state: AppState,
    store: FakeStore,
    sent: Arc<Mutex<Vec<CompletionRequest>>>,
    stream_dropped: Arc<AtomicBool>,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(Upstream::Chunks)
    }

    /// Provider that refuses every call with the given error.
    pub fn failing(make: fn() -> LlmError) -> Self {
        Self::build(Upstream::Fail(make))
    }

    /// Provider whose stream sends one chunk and then stays open.
    pub fn holding_open() -> Self {
        Self::build(Upstream::HoldOpen)
    }

    fn build(upstream: Upstream) -> Self {
        let store = FakeStore::default();
        let sent = Arc::new(Mutex::new(Vec::new()));
        let stream_dropped = Arc::new(AtomicBool::new(false));
        let provider = FakeProvider {
            upstream,
            sent: sent.clone(),
            stream_dropped: stream_dropped.clone(),
        };

        let chat = ChatService::new(
            BoxRecordStore::new(store.clone()),
            BoxCompletionProvider::new(provider),
            "test-model",
            ChatSettings::default(),
        );

        Self {
            state: AppState::new(chat),
            store,
            sent,
            stream_dropped,
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub fn add_bot(&self, name: &str, training_data: Option<&str>) -> BotId {
        let bot = Bot {
            id: BotId::new(),
            name: name.to_string(),
            description: None,
            training_data: training_data.map(str::to_string),
            template: BotTemplate::General,
            knowledge_base: KnowledgeBase::default(),
        };
        let id = bot.id;
        self.store.0.bots.lock().unwrap().insert(id, bot);
        id
    }

    pub fn add_conversation(&self, turns: Vec<Turn>) -> ConversationId {
        let conversation = Conversation {
            id: ConversationId::new(),
            bot_id: None,
            turns,
        };
        let id = conversation.id;
        self.store
            .0
            .conversations
            .lock()
            .unwrap()
            .insert(id, conversation);
        id
    }

    /// Make every bot lookup fail with `STORE_FAILURE_DETAIL`.
    pub fn fail_bot_lookups(&self) {
        self.store.0.fail_bot_lookups.store(true, Ordering::SeqCst);
    }

    /// Whether the held-open upstream stream has been released.
    pub fn upstream_released(&self) -> bool {
        self.stream_dropped.load(Ordering::SeqCst)
    }

    /// Record store lookups made so far.
    pub fn store_calls(&self) -> usize {
        self.store.0.calls.load(Ordering::SeqCst)
    }

    /// Completion requests the provider received so far.
    pub fn sent_requests(&self) -> Vec<CompletionRequest> {
        self.sent.lock().unwrap().clone()
    }
}
