mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (stderr, so stdout stays clean for `resolve`)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Commands::Generate(args) => commands::generate::handle(args).await,
        cli::Commands::Check(args) => commands::check::handle(args).await,
        cli::Commands::Resolve(args) => commands::resolve::handle(args).await,
        cli::Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
