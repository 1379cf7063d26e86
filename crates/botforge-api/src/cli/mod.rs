//! CLI command definitions for the `botforge` binary.
//!
//! Uses clap derive macros for argument parsing. Connection parameters and
//! secrets can also be supplied through `BOTFORGE_*` environment variables.

pub mod seed;
pub mod serve;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use secrecy::SecretString;

/// Serve the embeddable chatbot endpoint.
#[derive(Parser)]
#[command(name = "botforge", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Detailed output (-v for debug, -vv for trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP chat server.
    Serve(ServeArgs),

    /// Load bots and conversations from a JSON file into a SQLite store.
    Seed(SeedArgs),

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Args)]
pub struct ServeArgs {
    /// Host to bind to.
    #[arg(long, env = "BOTFORGE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "BOTFORGE_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long)]
    pub otel: bool,

    /// Path to botforge.toml (defaults to the platform config directory).
    #[arg(long, env = "BOTFORGE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub llm: LlmArgs,
}

/// Where bots and conversations are read from.
#[derive(Args)]
pub struct StoreArgs {
    /// Record store URL: `sqlite://path.db` or a PostgREST base `https://...`.
    #[arg(long, env = "BOTFORGE_STORE_URL")]
    pub store_url: Option<String>,

    /// Service key for the REST record store.
    #[arg(long, env = "BOTFORGE_STORE_KEY", hide_env_values = true)]
    pub store_key: Option<String>,
}

/// Completion API overrides on top of the config file.
#[derive(Args)]
pub struct LlmArgs {
    /// Bearer credential for the completion API.
    #[arg(long, env = "BOTFORGE_LLM_API_KEY", hide_env_values = true)]
    pub llm_api_key: Option<String>,

    /// OpenAI-compatible base URL (overrides `[llm].base_url`).
    #[arg(long, env = "BOTFORGE_LLM_BASE_URL")]
    pub llm_base_url: Option<String>,

    /// Model identifier (overrides `[llm].model`).
    #[arg(long, env = "BOTFORGE_LLM_MODEL")]
    pub llm_model: Option<String>,
}

#[derive(Args)]
pub struct SeedArgs {
    /// JSON file with `{ "bots": [...], "conversations": [...] }`.
    #[arg(short, long)]
    pub file: PathBuf,

    /// SQLite store URL (defaults to the platform data directory).
    #[arg(long, env = "BOTFORGE_STORE_URL")]
    pub store_url: Option<String>,
}

/// Wrap a non-blank CLI/env secret.
pub fn secret(value: Option<&str>) -> Option<SecretString> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
}
