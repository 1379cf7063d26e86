//! Record store factory.
//!
//! The store URL's scheme selects the backend: `sqlite:` opens a local
//! [`SqliteRecordStore`], `http:`/`https:` talks to a PostgREST gateway
//! through [`RestRecordStore`].

use secrecy::SecretString;
use thiserror::Error;

use botforge_core::repository::box_store::BoxRecordStore;
use botforge_types::error::RepositoryError;

use crate::rest::RestRecordStore;
use crate::sqlite::SqliteRecordStore;

/// Which record store implementation a URL refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Rest,
}

impl StoreBackend {
    pub fn from_url(url: &str) -> Result<Self, StoreError> {
        let scheme = url
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .unwrap_or_default();

        match scheme.as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "http" | "https" => Ok(StoreBackend::Rest),
            _ => Err(StoreError::UnsupportedScheme(url.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unsupported record store URL '{0}' (expected sqlite:, http: or https:)")]
    UnsupportedScheme(String),

    #[error("a service key is required for the REST record store")]
    MissingKey,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Open the record store named by `url`.
///
/// The REST backend requires `api_key`; the SQLite backend ignores it.
pub async fn connect_record_store(
    url: &str,
    api_key: Option<SecretString>,
) -> Result<BoxRecordStore, StoreError> {
    match StoreBackend::from_url(url)? {
        StoreBackend::Sqlite => {
            let store = SqliteRecordStore::connect(url).await?;
            tracing::info!("Using SQLite record store");
            Ok(BoxRecordStore::new(store))
        }
        StoreBackend::Rest => {
            let key = api_key.ok_or(StoreError::MissingKey)?;
            let store = RestRecordStore::new(url, key)?;
            tracing::info!(base_url = store.base_url(), "Using REST record store");
            Ok(BoxRecordStore::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botforge_core::repository::bot::BotRepository;
    use botforge_types::bot::BotId;

    #[test]
    fn test_backend_from_scheme() {
        assert_eq!(
            StoreBackend::from_url("sqlite://data/botforge.db").unwrap(),
            StoreBackend::Sqlite
        );
        assert_eq!(
            StoreBackend::from_url("sqlite::memory:").unwrap(),
            StoreBackend::Sqlite
        );
        assert_eq!(
            StoreBackend::from_url("https://abc.example.co").unwrap(),
            StoreBackend::Rest
        );
        assert_eq!(
            StoreBackend::from_url("HTTP://localhost:54321").unwrap(),
            StoreBackend::Rest
        );
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        assert!(matches!(
            StoreBackend::from_url("postgres://db"),
            Err(StoreError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            StoreBackend::from_url("no-scheme"),
            Err(StoreError::UnsupportedScheme(_))
        ));
    }

    #[tokio::test]
    async fn test_rest_without_key_is_rejected() {
        assert!(matches!(
            connect_record_store("https://abc.example.co", None).await,
            Err(StoreError::MissingKey)
        ));
    }

    #[tokio::test]
    async fn test_sqlite_store_opens() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("f.db").display());
        let store = connect_record_store(&url, None).await.unwrap();
        assert!(store.get_bot(&BotId::new()).await.unwrap().is_none());
    }
}
