//! Botforge entry point.
//!
//! Binary name: `botforge`
//!
//! Parses CLI arguments, initializes tracing, then dispatches to the chat
//! server, the seed loader, or shell completion generation.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use botforge_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need logging or state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "botforge", &mut std::io::stdout());
        return Ok(());
    }

    let otel = matches!(&cli.command, Commands::Serve(args) if args.otel);
    init_tracing(&TracingOptions {
        otel,
        json: cli.log_json,
        verbosity: cli.verbose,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = match cli.command {
        Commands::Serve(args) => cli::serve::serve(args).await,
        Commands::Seed(args) => cli::seed::seed(args).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}
