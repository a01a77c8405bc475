//! Subcommand implementations.

pub mod calc;
pub mod categories;
pub mod diagnose;
pub mod sources;

use anyhow::Context as _;

use commission_catalog::pipeline::{AttemptFailure, CatalogSource};
use commission_catalog::{
    static_catalog, Category, FetchOrchestrator, FileStore, HttpExecutor, SourceConfig,
    SourceRegistry,
};

use crate::config::Settings;

/// Shared state for one invocation.
pub struct Context {
    pub settings: Settings,
    pub json: bool,
    pub registry: SourceRegistry<FileStore>,
    pub orchestrator: FetchOrchestrator,
}

impl Context {
    pub fn new(settings: Settings, json: bool) -> Self {
        let registry = SourceRegistry::new(FileStore::new(&settings.store_dir));
        let orchestrator = FetchOrchestrator::new(HttpExecutor::new(settings.timeout_ms))
            .with_origin(settings.origin.clone());
        Self {
            settings,
            json,
            registry,
            orchestrator,
        }
    }

    /// A saved source by name, or an error naming it.
    pub fn source(&self, name: &str) -> anyhow::Result<SourceConfig> {
        self.registry
            .find(name)
            .context("failed to read saved sources")?
            .with_context(|| format!("no saved source named '{name}'"))
    }
}

/// Where a resolved tree came from, for display.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TreeOrigin {
    Default {
        source: CatalogSource,
        failures: Vec<AttemptFailure>,
    },
    Source { name: String },
    /// A configured source failed and the static catalog stands in.
    SourceFallback { name: String, error: String },
    Offline,
}

/// The category tree for a command.
///
/// A failing configured source is replaced by the static catalog; the
/// default chain does its own fallback.
pub async fn resolve_tree(
    ctx: &Context,
    source: Option<&str>,
    offline: bool,
) -> anyhow::Result<(Vec<Category>, TreeOrigin)> {
    if offline {
        return Ok((static_catalog(), TreeOrigin::Offline));
    }

    let Some(name) = source else {
        let outcome = ctx.orchestrator.fetch_categories().await;
        let origin = TreeOrigin::Default {
            source: outcome.source,
            failures: outcome.failures,
        };
        return Ok((outcome.categories, origin));
    };

    let config = ctx.source(name)?;
    match ctx.orchestrator.fetch_with_config(&config).await {
        Ok(categories) => Ok((
            categories,
            TreeOrigin::Source {
                name: config.name,
            },
        )),
        Err(e) => {
            tracing::warn!("Source '{}' failed, using static catalog: {}", config.name, e);
            Ok((
                static_catalog(),
                TreeOrigin::SourceFallback {
                    name: config.name,
                    error: e.to_string(),
                },
            ))
        }
    }
}
