use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

mod commands;
mod config;
mod logging;

#[derive(Parser)]
#[command(name = "folio", about = "A terminal portfolio with animated view transitions")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Extra config file merged over user and project config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the portfolio (default)
    Open(commands::open::OpenArgs),
    /// List configured views
    Views,
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Open(commands::open::OpenArgs::default()));

    match &command {
        Commands::Open(_) => logging::init_file(cli.verbose, &folio_paths::log_file())?,
        _ => logging::init_stderr(cli.verbose),
    }
    info!(version = env!("CARGO_PKG_VERSION"), "folio starting");

    let explicit = cli.config.as_deref();
    match command {
        Commands::Open(args) => commands::open::run(args, explicit).await,
        Commands::Views => commands::views::run(explicit),
        Commands::Config(args) => commands::config::run(args, explicit),
    }
}
