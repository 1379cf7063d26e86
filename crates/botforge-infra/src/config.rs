//! Service configuration loader for Botforge.
//!
//! Reads `botforge.toml` (explicit path, or `~/.config/botforge/botforge.toml`)
//! and deserializes it into [`ServiceConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::{Path, PathBuf};

use botforge_types::config::ServiceConfig;

const CONFIG_FILE_NAME: &str = "botforge.toml";

/// Default location of the config file in the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("botforge").join(CONFIG_FILE_NAME))
}

/// Load service configuration.
///
/// - `path = None` uses [`default_config_path`].
/// - A missing file returns [`ServiceConfig::default()`].
/// - A file that fails to read or parse logs a warning and returns the default.
pub async fn load_service_config(path: Option<&Path>) -> ServiceConfig {
    let Some(config_path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
        tracing::debug!("No config directory available, using defaults");
        return ServiceConfig::default();
    };

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
    };

    match toml::from_str::<ServiceConfig>(&content) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            config
        }
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServiceConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_service_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_service_config(Some(&tmp.path().join(CONFIG_FILE_NAME))).await;
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.chat.reply_history_limit, Some(10));
        assert_eq!(config.chat.reply_max_tokens, 500);
    }

    #[tokio::test]
    async fn load_service_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(CONFIG_FILE_NAME);
        tokio::fs::write(
            &config_path,
            r#"
[llm]
base_url = "http://localhost:11434/v1"
model = "llama3.1"
temperature = 0.2

[chat]
reply_history_limit = 4
reply_max_tokens = 256
"#,
        )
        .await
        .unwrap();

        let config = load_service_config(Some(&config_path)).await;
        assert_eq!(config.llm.base_url, "http://localhost:11434/v1");
        assert_eq!(config.llm.model, "llama3.1");
        assert_eq!(config.llm.temperature, Some(0.2));
        assert_eq!(config.chat.reply_history_limit, Some(4));
        assert_eq!(config.chat.reply_max_tokens, 256);
        assert_eq!(config.chat.stream_history_limit, None);
    }

    #[tokio::test]
    async fn load_service_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(CONFIG_FILE_NAME);
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_service_config(Some(&config_path)).await;
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.chat.reply_max_tokens, 500);
    }

    #[test]
    fn default_config_path_ends_with_file_name() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("botforge/botforge.toml"));
        }
    }
}
