use std::path::PathBuf;

use anyhow::Context as _;
use clap::Subcommand;

use commission_catalog::SourceConfig;

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum SourcesCommand {
    /// List saved sources.
    List,

    /// Show one saved source as JSON.
    Show { name: String },

    /// Save a source from a preset (trendyol, nesatilir, custom).
    Add {
        #[arg(long)]
        preset: String,

        /// Name to save under (defaults to the preset's name).
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        endpoint: Option<String>,

        #[arg(long)]
        api_key: Option<String>,

        #[arg(long)]
        data_path: Option<String>,
    },

    /// Save a source from a JSON file.
    Import { file: PathBuf },

    /// Write a saved source as JSON.
    Export {
        name: String,

        /// Output file (stdout when omitted).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Delete a saved source.
    Remove { name: String },

    /// Fetch a saved source once and report what it yields.
    Test { name: String },
}

pub async fn run(ctx: &Context, command: SourcesCommand) -> anyhow::Result<()> {
    match command {
        SourcesCommand::List => list(ctx),
        SourcesCommand::Show { name } => {
            let config = ctx.source(&name)?;
            output::print_json(&config)
        }
        SourcesCommand::Add {
            preset,
            name,
            endpoint,
            api_key,
            data_path,
        } => {
            let mut config = SourceConfig::preset(&preset).with_context(|| {
                format!(
                    "unknown preset '{preset}' (expected one of: {})",
                    SourceConfig::preset_names().join(", ")
                )
            })?;
            if let Some(name) = name {
                config.name = name;
            }
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint;
            }
            if let Some(api_key) = api_key {
                config.api_key = api_key;
            }
            if let Some(data_path) = data_path {
                config.data_path = data_path;
            }
            save(ctx, config)
        }
        SourcesCommand::Import { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let config: SourceConfig = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a valid source", file.display()))?;
            save(ctx, config)
        }
        SourcesCommand::Export { name, out } => {
            let config = ctx.source(&name)?;
            let raw = serde_json::to_string_pretty(&config)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, raw)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    if !ctx.json {
                        println!("Exported '{}' to {}", config.name, path.display());
                    }
                }
                None => println!("{raw}"),
            }
            Ok(())
        }
        SourcesCommand::Remove { name } => {
            if !ctx.registry.remove(&name)? {
                anyhow::bail!("no saved source named '{name}'");
            }
            if ctx.json {
                return output::print_json(&serde_json::json!({ "removed": name }));
            }
            println!("Removed '{name}'");
            Ok(())
        }
        SourcesCommand::Test { name } => {
            let config = ctx.source(&name)?;
            let report = ctx.orchestrator.test_source(&config).await;
            if ctx.json {
                return output::print_json(&report);
            }
            let mark = if report.success { "ok" } else { "FAILED" };
            println!("{name}: {mark}: {}", report.message);
            if let Some(kind) = &report.error {
                println!("  error: {kind}");
            }
            output::print_tree(&report.sample);
            Ok(())
        }
    }
}

fn list(ctx: &Context) -> anyhow::Result<()> {
    let configs = ctx.registry.load()?;
    if ctx.json {
        return output::print_json(&configs);
    }
    if configs.is_empty() {
        println!("No saved sources in {}", ctx.settings.store_dir.display());
        return Ok(());
    }
    for config in &configs {
        let endpoint = if config.endpoint.is_empty() {
            "(no endpoint)"
        } else {
            config.endpoint.as_str()
        };
        println!("{:<24} {:<4} {}", config.name, config.method.as_str(), endpoint);
    }
    Ok(())
}

fn save(ctx: &Context, config: SourceConfig) -> anyhow::Result<()> {
    anyhow::ensure!(!config.name.trim().is_empty(), "source name must not be empty");
    let name = config.name.clone();
    ctx.registry.save(config)?;
    tracing::info!("Saved source '{name}'");
    if ctx.json {
        return output::print_json(&serde_json::json!({ "saved": name }));
    }
    println!("Saved '{name}' to {}", ctx.settings.store_dir.display());
    Ok(())
}
