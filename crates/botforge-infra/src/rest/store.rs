//! RestRecordStore -- record store ports over a PostgREST HTTP API.
//!
//! Each lookup is a single `GET {base}/rest/v1/{table}?id=eq.{id}&select=...`
//! carrying the service key both as `apikey` and as a bearer token. The
//! gateway answers with a JSON array; the first row (if any) is the record.

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use botforge_core::repository::bot::BotRepository;
use botforge_core::repository::conversation::ConversationRepository;
use botforge_types::bot::{Bot, BotId};
use botforge_types::conversation::{Conversation, ConversationId};
use botforge_types::error::RepositoryError;

use crate::record::{BOT_COLUMNS, BotRecord, CONVERSATION_COLUMNS, ConversationRecord};

/// Record store backed by a PostgREST endpoint.
///
/// The service key is held as a [`SecretString`] and only exposed when
/// building request headers.
pub struct RestRecordStore {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl RestRecordStore {
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Result<Self, RepositoryError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| RepositoryError::Connection(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    /// Fetch the row whose `id` equals `id`, or `None` when the table has none.
    async fn fetch_first<T: DeserializeOwned>(
        &self,
        table: &str,
        columns: &str,
        id: &str,
    ) -> Result<Option<T>, RepositoryError> {
        let key = self.api_key.expose_secret();

        let response = self
            .client
            .get(self.table_url(table))
            .query(&[("id", format!("eq.{id}")), ("select", columns.to_string())])
            .header("apikey", key)
            .bearer_auth(key)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(table, %status, %body, "Record store query failed");
            return Err(RepositoryError::Query(format!("HTTP {status}")));
        }

        let mut rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| RepositoryError::Decode(format!("failed to parse {table} rows: {e}")))?;

        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(rows.swap_remove(0)))
    }
}

impl BotRepository for RestRecordStore {
    async fn get_bot(&self, id: &BotId) -> Result<Option<Bot>, RepositoryError> {
        self.fetch_first::<BotRecord>("bots", BOT_COLUMNS, &id.to_string())
            .await?
            .map(BotRecord::into_bot)
            .transpose()
    }
}

impl ConversationRepository for RestRecordStore {
    async fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        self.fetch_first::<ConversationRecord>("conversations", CONVERSATION_COLUMNS, &id.to_string())
            .await?
            .map(ConversationRecord::into_conversation)
            .transpose()
    }
}
