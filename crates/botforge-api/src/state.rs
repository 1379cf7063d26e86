//! Application state wiring the chat service to its adapters.
//!
//! `ChatService` is generic over the record store and completion provider;
//! AppState pins both to boxed trait objects so the backend can be chosen at
//! runtime from the store URL.

use std::sync::Arc;

use botforge_core::chat::service::ChatService;
use botforge_core::llm::box_provider::BoxCompletionProvider;
use botforge_core::repository::box_store::BoxRecordStore;
use botforge_infra::config::load_service_config;
use botforge_infra::llm::create_provider;
use botforge_infra::sqlite::pool::{default_data_dir, default_database_url};
use botforge_infra::store::connect_record_store;

use crate::cli::{ServeArgs, secret};

pub type ConcreteChatService = ChatService<BoxRecordStore, BoxCompletionProvider>;

/// Shared state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ConcreteChatService>,
}

impl AppState {
    pub fn new(chat: ConcreteChatService) -> Self {
        Self {
            chat: Arc::new(chat),
        }
    }

    /// Load configuration, open the record store and build the provider.
    ///
    /// CLI/env values override the config file.
    pub async fn init(args: &ServeArgs) -> anyhow::Result<Self> {
        let mut config = load_service_config(args.config.as_deref()).await;
        if let Some(base_url) = &args.llm.llm_base_url {
            config.llm.base_url = base_url.clone();
        }
        if let Some(model) = &args.llm.llm_model {
            config.llm.model = model.clone();
        }

        let store_url = match &args.store.store_url {
            Some(url) => url.clone(),
            None => {
                tokio::fs::create_dir_all(default_data_dir()).await?;
                default_database_url()
            }
        };
        let store = connect_record_store(&store_url, secret(args.store.store_key.as_deref())).await?;

        let provider = create_provider(&config.llm, secret(args.llm.llm_api_key.as_deref()))?;
        tracing::info!(
            model = %config.llm.model,
            base_url = %config.llm.base_url,
            "Completion provider ready"
        );

        let chat = ChatService::new(store, provider, config.llm.model.clone(), config.chat)
            .with_temperature(config.llm.temperature);

        Ok(Self::new(chat))
    }
}
