//! BoxRecordStore -- object-safe dynamic dispatch wrapper for the record store ports.
//!
//! Same blanket-impl pattern as `BoxCompletionProvider`:
//! 1. Define an object-safe `RecordStoreDyn` trait with boxed futures
//! 2. Blanket-impl `RecordStoreDyn` for every `T: BotRepository + ConversationRepository`
//! 3. `BoxRecordStore` wraps `Box<dyn RecordStoreDyn>` and implements both ports

use std::future::Future;
use std::pin::Pin;

use botforge_types::bot::{Bot, BotId};
use botforge_types::conversation::{Conversation, ConversationId};
use botforge_types::error::RepositoryError;

use super::bot::BotRepository;
use super::conversation::ConversationRepository;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Object-safe version of the record store ports.
pub trait RecordStoreDyn: Send + Sync {
    fn get_bot_boxed<'a>(
        &'a self,
        id: &'a BotId,
    ) -> BoxFuture<'a, Result<Option<Bot>, RepositoryError>>;

    fn get_conversation_boxed<'a>(
        &'a self,
        id: &'a ConversationId,
    ) -> BoxFuture<'a, Result<Option<Conversation>, RepositoryError>>;
}

impl<T: BotRepository + ConversationRepository> RecordStoreDyn for T {
    fn get_bot_boxed<'a>(
        &'a self,
        id: &'a BotId,
    ) -> BoxFuture<'a, Result<Option<Bot>, RepositoryError>> {
        Box::pin(self.get_bot(id))
    }

    fn get_conversation_boxed<'a>(
        &'a self,
        id: &'a ConversationId,
    ) -> BoxFuture<'a, Result<Option<Conversation>, RepositoryError>> {
        Box::pin(self.get_conversation(id))
    }
}

/// Type-erased record store, selected at runtime (REST or SQLite).
pub struct BoxRecordStore {
    inner: Box<dyn RecordStoreDyn>,
}

impl BoxRecordStore {
    pub fn new<T: BotRepository + ConversationRepository + 'static>(store: T) -> Self {
        Self {
            inner: Box::new(store),
        }
    }
}

impl BotRepository for BoxRecordStore {
    async fn get_bot(&self, id: &BotId) -> Result<Option<Bot>, RepositoryError> {
        self.inner.get_bot_boxed(id).await
    }
}

impl ConversationRepository for BoxRecordStore {
    async fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        self.inner.get_conversation_boxed(id).await
    }
}
