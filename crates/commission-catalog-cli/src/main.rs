//! commission-catalog: fetch, inspect and price against category commission rates.

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use commission_catalog::CatalogError;

use crate::commands::calc::CalcArgs;
use crate::commands::sources::SourcesCommand;
use crate::commands::Context;
use crate::config::{Overrides, Settings};

#[derive(Parser)]
#[command(
    name = "commission-catalog",
    about = "Normalize marketplace category feeds into a commission-rate tree",
    version
)]
struct Cli {
    /// Directory holding saved source configurations.
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    /// Origin for the default fetch chain.
    #[arg(long, global = true)]
    origin: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the category tree.
    Categories {
        /// Use a saved source instead of the default chain.
        #[arg(long)]
        source: Option<String>,

        /// Skip the network and print the static catalog.
        #[arg(long, conflicts_with = "source")]
        offline: bool,
    },

    /// Look up one category by id.
    Find {
        id: i64,

        /// Use a saved source instead of the default chain.
        #[arg(long)]
        source: Option<String>,
    },

    /// Send the first default attempt and show the raw response.
    Probe,

    /// Check whether the default origin is reachable.
    Status,

    /// Manage saved sources.
    #[command(subcommand)]
    Sources(SourcesCommand),

    /// Calculate per-unit profit.
    Calc(CalcArgs),

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   commission-catalog completions bash > ~/.local/share/bash-completion/completions/commission-catalog
    ///   commission-catalog completions zsh > ~/.zfunc/_commission-catalog
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let json = cli.json;
    if let Err(e) = run(cli).await {
        if json {
            let kind = e
                .downcast_ref::<CatalogError>()
                .map(CatalogError::kind)
                .unwrap_or("Error");
            let body = serde_json::json!({ "error": kind, "message": format!("{e:#}") });
            println!("{body}");
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "commission-catalog", &mut std::io::stdout());
        return Ok(());
    }

    let settings = Settings::resolve(&Overrides {
        store_dir: cli.store_dir,
        origin: cli.origin,
        timeout_ms: cli.timeout_ms,
    })?;
    tracing::debug!("Store: {}", settings.store_dir.display());

    let ctx = Context::new(settings, cli.json);

    match cli.command {
        Commands::Categories { source, offline } => {
            commands::categories::list(&ctx, source.as_deref(), offline).await
        }
        Commands::Find { id, source } => commands::categories::find(&ctx, id, source.as_deref()).await,
        Commands::Probe => commands::diagnose::probe(&ctx).await,
        Commands::Status => commands::diagnose::status(&ctx).await,
        Commands::Sources(command) => commands::sources::run(&ctx, command).await,
        Commands::Calc(args) => commands::calc::run(&ctx, &args).await,
        Commands::Completions { .. } => Ok(()),
    }
}
