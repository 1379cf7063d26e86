//! Bot repository trait definition.

use botforge_types::bot::{Bot, BotId};
use botforge_types::error::RepositoryError;

/// Read access to stored bot configurations.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait BotRepository: Send + Sync {
    /// Fetch a single bot by identifier. `Ok(None)` means no such record.
    fn get_bot(
        &self,
        id: &BotId,
    ) -> impl std::future::Future<Output = Result<Option<Bot>, RepositoryError>> + Send;
}
