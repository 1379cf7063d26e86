//! Conversation repository trait definition.

use botforge_types::conversation::{Conversation, ConversationId};
use botforge_types::error::RepositoryError;

/// Read access to stored conversations.
pub trait ConversationRepository: Send + Sync {
    /// Fetch a single conversation by identifier. `Ok(None)` means no such record.
    fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;
}
