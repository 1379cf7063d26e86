//! Stored row shapes shared by the REST and SQLite record stores.
//!
//! Rows use the column names of the hosted `bots` / `conversations` tables.
//! Ids arrive as strings and JSON columns as raw values; conversion into
//! domain types happens here so both backends decode identically.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use botforge_types::bot::{Bot, BotId, BotTemplate, KnowledgeBase};
use botforge_types::conversation::{Conversation, ConversationId, Turn};
use botforge_types::error::RepositoryError;

/// Columns read from the `bots` table.
pub const BOT_COLUMNS: &str = "id,name,description,training_data,template,knowledge_base";

/// Columns read from the `conversations` table.
pub const CONVERSATION_COLUMNS: &str = "id,bot_id,messages";

/// One row of the `bots` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub training_data: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub knowledge_base: Option<Value>,
}

impl BotRecord {
    pub fn into_bot(self) -> Result<Bot, RepositoryError> {
        let id = self
            .id
            .parse::<BotId>()
            .map_err(|e| RepositoryError::Decode(format!("invalid bot id '{}': {e}", self.id)))?;

        Ok(Bot {
            id,
            name: self.name,
            description: self.description,
            training_data: self.training_data,
            template: BotTemplate::from_stored(self.template.as_deref()),
            knowledge_base: self
                .knowledge_base
                .as_ref()
                .map(KnowledgeBase::from_json)
                .unwrap_or_default(),
        })
    }
}

impl From<&Bot> for BotRecord {
    fn from(bot: &Bot) -> Self {
        let knowledge_base = (!bot.knowledge_base.is_empty()).then(|| {
            Value::Object(
                bot.knowledge_base
                    .entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            )
        });

        Self {
            id: bot.id.to_string(),
            name: bot.name.clone(),
            description: bot.description.clone(),
            training_data: bot.training_data.clone(),
            template: Some(bot.template.to_string()),
            knowledge_base,
        }
    }
}

/// One row of the `conversations` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: String,
    #[serde(default)]
    pub bot_id: Option<String>,
    #[serde(default)]
    pub messages: Option<Value>,
}

impl ConversationRecord {
    pub fn into_conversation(self) -> Result<Conversation, RepositoryError> {
        let id = self.id.parse::<ConversationId>().map_err(|e| {
            RepositoryError::Decode(format!("invalid conversation id '{}': {e}", self.id))
        })?;

        // A dangling or malformed bot reference does not invalidate the history.
        let bot_id = self.bot_id.as_deref().and_then(|b| b.parse::<BotId>().ok());

        let turns = match self.messages {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => serde_json::from_value::<Vec<Turn>>(value)
                .map_err(|e| RepositoryError::Decode(format!("invalid messages JSON: {e}")))?,
        };

        Ok(Conversation { id, bot_id, turns })
    }
}

impl From<&Conversation> for ConversationRecord {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id.to_string(),
            bot_id: conversation.bot_id.map(|b| b.to_string()),
            messages: serde_json::to_value(&conversation.turns).ok(),
        }
    }
}

/// Contents of a `botforge seed` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub bots: Vec<BotRecord>,
    #[serde(default)]
    pub conversations: Vec<ConversationRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use botforge_types::conversation::TurnRole;
    use serde_json::json;

    #[test]
    fn test_bot_record_decodes_optional_columns() {
        let record: BotRecord = serde_json::from_value(json!({
            "id": "0190f5a4-7c1e-7000-8000-000000000001",
            "name": "Ada",
            "description": null,
            "template": "customer_support",
            "knowledge_base": { "hours": "9-5", "seats": 4 }
        }))
        .unwrap();

        let bot = record.into_bot().unwrap();
        assert_eq!(bot.name, "Ada");
        assert_eq!(bot.description, None);
        assert_eq!(bot.template, BotTemplate::CustomerSupport);
        assert_eq!(bot.knowledge_base.len(), 2);
    }

    #[test]
    fn test_bot_record_unknown_template_is_general() {
        let record = BotRecord {
            id: BotId::new().to_string(),
            name: "Ada".to_string(),
            description: None,
            training_data: None,
            template: Some("astrology".to_string()),
            knowledge_base: Some(json!(["not", "an", "object"])),
        };
        let bot = record.into_bot().unwrap();
        assert_eq!(bot.template, BotTemplate::General);
        assert!(bot.knowledge_base.is_empty());
    }

    #[test]
    fn test_bot_record_bad_id_is_decode_error() {
        let record = BotRecord {
            id: "nope".to_string(),
            name: String::new(),
            description: None,
            training_data: None,
            template: None,
            knowledge_base: None,
        };
        assert!(matches!(record.into_bot(), Err(RepositoryError::Decode(_))));
    }

    #[test]
    fn test_conversation_record_decodes_turns() {
        let record: ConversationRecord = serde_json::from_value(json!({
            "id": ConversationId::new().to_string(),
            "bot_id": "garbage",
            "messages": [
                { "role": "user", "content": "hi" },
                { "role": "assistant", "content": "hello" }
            ]
        }))
        .unwrap();

        let conversation = record.into_conversation().unwrap();
        assert_eq!(conversation.bot_id, None);
        assert_eq!(conversation.turns.len(), 2);
        assert_eq!(conversation.turns[1].role, TurnRole::Assistant);
    }

    #[test]
    fn test_conversation_record_null_messages_is_empty() {
        let record = ConversationRecord {
            id: ConversationId::new().to_string(),
            bot_id: None,
            messages: Some(Value::Null),
        };
        assert!(record.into_conversation().unwrap().turns.is_empty());
    }

    #[test]
    fn test_conversation_record_malformed_messages_is_decode_error() {
        let record = ConversationRecord {
            id: ConversationId::new().to_string(),
            bot_id: None,
            messages: Some(json!({ "role": "user" })),
        };
        assert!(matches!(
            record.into_conversation(),
            Err(RepositoryError::Decode(_))
        ));
    }

    #[test]
    fn test_seed_data_defaults_missing_sections() {
        let seed: SeedData = serde_json::from_str(r#"{ "bots": [] }"#).unwrap();
        assert!(seed.bots.is_empty());
        assert!(seed.conversations.is_empty());
    }
}
