//! Runtime settings resolved from flags, environment and defaults.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use commission_catalog::http::DEFAULT_TIMEOUT_MS;
use commission_catalog::pipeline::DEFAULT_ORIGIN;

pub const STORE_DIR_ENV: &str = "COMMISSION_CATALOG_DIR";
pub const ORIGIN_ENV: &str = "COMMISSION_CATALOG_ORIGIN";
pub const TIMEOUT_ENV: &str = "COMMISSION_CATALOG_TIMEOUT_MS";

const STORE_DIR_NAME: &str = ".commission-catalog";

/// Values given explicitly on the command line.
#[derive(Debug, Default)]
pub struct Overrides {
    pub store_dir: Option<PathBuf>,
    pub origin: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub store_dir: PathBuf,
    pub origin: String,
    pub timeout_ms: u64,
}

impl Settings {
    pub fn resolve(overrides: &Overrides) -> anyhow::Result<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok(), Path::new("."))
    }

    /// Resolve against an explicit environment lookup and working directory.
    pub fn resolve_with(
        overrides: &Overrides,
        env: impl Fn(&str) -> Option<String>,
        cwd: &Path,
    ) -> anyhow::Result<Self> {
        let timeout_ms = match (overrides.timeout_ms, env(TIMEOUT_ENV)) {
            (Some(ms), _) => ms,
            (None, Some(raw)) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid {TIMEOUT_ENV}: {raw:?}"))?,
            (None, None) => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            store_dir: resolve_store_dir(overrides.store_dir.as_deref(), &env, cwd),
            origin: overrides
                .origin
                .clone()
                .or_else(|| env(ORIGIN_ENV))
                .unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
            timeout_ms,
        })
    }
}

/// Explicit flag, then env var, then `./.commission-catalog` if present,
/// then the home directory.
pub fn resolve_store_dir(
    explicit: Option<&Path>,
    env: &impl Fn(&str) -> Option<String>,
    cwd: &Path,
) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }

    if let Some(dir) = env(STORE_DIR_ENV) {
        return PathBuf::from(dir);
    }

    let local = cwd.join(STORE_DIR_NAME);
    if local.is_dir() {
        return local;
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(STORE_DIR_NAME)
}
