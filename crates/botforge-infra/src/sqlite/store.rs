//! SQLite record store.
//!
//! Implements both record store ports from `botforge-core` using sqlx with
//! split read/write pools. Rows are decoded through the shared
//! [`BotRecord`] / [`ConversationRecord`] shapes so the SQLite and REST
//! backends agree on every column.

use chrono::Utc;
use sqlx::Row;

use botforge_core::repository::bot::BotRepository;
use botforge_core::repository::conversation::ConversationRepository;
use botforge_types::bot::{Bot, BotId};
use botforge_types::conversation::{Conversation, ConversationId};
use botforge_types::error::RepositoryError;

use super::pool::DatabasePool;
use crate::record::{BotRecord, ConversationRecord, SeedData};

/// Counts of rows written by [`SqliteRecordStore::seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub bots: usize,
    pub conversations: usize,
}

/// SQLite-backed record store.
pub struct SqliteRecordStore {
    pool: DatabasePool,
}

impl SqliteRecordStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Open the database at `database_url` (running migrations) and wrap it.
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = DatabasePool::new(database_url)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Insert or replace a bot.
    pub async fn upsert_bot(&self, bot: &Bot) -> Result<(), RepositoryError> {
        let record = BotRecord::from(bot);
        let knowledge_base = record
            .knowledge_base
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO bots (id, name, description, training_data, template, knowledge_base, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                training_data = excluded.training_data,
                template = excluded.template,
                knowledge_base = excluded.knowledge_base,
                updated_at = excluded.updated_at",
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.description)
        .bind(&record.training_data)
        .bind(&record.template)
        .bind(&knowledge_base)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    /// Insert or replace a conversation and its full turn list.
    pub async fn upsert_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<(), RepositoryError> {
        let messages = serde_json::to_string(&conversation.turns)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO conversations (id, bot_id, messages, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                bot_id = excluded.bot_id,
                messages = excluded.messages,
                updated_at = excluded.updated_at",
        )
        .bind(conversation.id.to_string())
        .bind(conversation.bot_id.map(|b| b.to_string()))
        .bind(&messages)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    /// Load a seed file's records. Bots are written before conversations so
    /// foreign keys resolve; every record is decoded before anything is written.
    pub async fn seed(&self, data: SeedData) -> Result<SeedSummary, RepositoryError> {
        let bots = data
            .bots
            .into_iter()
            .map(BotRecord::into_bot)
            .collect::<Result<Vec<_>, _>>()?;
        let conversations = data
            .conversations
            .into_iter()
            .map(ConversationRecord::into_conversation)
            .collect::<Result<Vec<_>, _>>()?;

        for bot in &bots {
            self.upsert_bot(bot).await?;
        }
        for conversation in &conversations {
            self.upsert_conversation(conversation).await?;
        }

        tracing::info!(
            bots = bots.len(),
            conversations = conversations.len(),
            "Seeded record store"
        );

        Ok(SeedSummary {
            bots: bots.len(),
            conversations: conversations.len(),
        })
    }
}

fn decode_bot_row(row: &sqlx::sqlite::SqliteRow) -> Result<BotRecord, sqlx::Error> {
    let knowledge_base: Option<String> = row.try_get("knowledge_base")?;
    Ok(BotRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        training_data: row.try_get("training_data")?,
        template: row.try_get("template")?,
        // Unparseable JSON degrades to an empty knowledge base.
        knowledge_base: knowledge_base.and_then(|kb| serde_json::from_str(&kb).ok()),
    })
}

fn decode_conversation_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<(ConversationRecord, String), sqlx::Error> {
    let messages: String = row.try_get("messages")?;
    Ok((
        ConversationRecord {
            id: row.try_get("id")?,
            bot_id: row.try_get("bot_id")?,
            messages: None,
        },
        messages,
    ))
}

impl BotRepository for SqliteRecordStore {
    async fn get_bot(&self, id: &BotId) -> Result<Option<Bot>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, name, description, training_data, template, knowledge_base FROM bots WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref()
            .map(|r| {
                decode_bot_row(r)
                    .map_err(|e| RepositoryError::Decode(e.to_string()))?
                    .into_bot()
            })
            .transpose()
    }
}

impl ConversationRepository for SqliteRecordStore {
    async fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let row = sqlx::query("SELECT id, bot_id, messages FROM conversations WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let (mut record, messages) =
            decode_conversation_row(&row).map_err(|e| RepositoryError::Decode(e.to_string()))?;
        record.messages = Some(
            serde_json::from_str(&messages)
                .map_err(|e| RepositoryError::Decode(format!("invalid messages JSON: {e}")))?,
        );
        record.into_conversation().map(Some)
    }
}
