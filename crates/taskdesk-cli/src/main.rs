//! # taskdesk CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// taskdesk — request workflow service.
///
/// Serves the request-status HTTP API and provides tooling around the
/// signed email action tokens.
#[derive(Parser, Debug)]
#[command(name = "taskdesk", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server.
    Serve(taskdesk_cli::serve::ServeArgs),
    /// Mint and inspect email action tokens.
    Token(taskdesk_cli::token::TokenArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => taskdesk_cli::serve::run(args).await,
        Commands::Token(args) => taskdesk_cli::token::run(args),
    }
}
