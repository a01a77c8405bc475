//! Persisted source configurations behind a key-value seam.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::source::SourceConfig;
use crate::types::{CatalogError, CatalogResult};

/// Key under which the source list is stored.
pub const SOURCES_KEY: &str = "apiConfigs";

/// String-valued key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> CatalogResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> CatalogResult<()>;
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CatalogResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CatalogError::Storage("memory store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CatalogResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CatalogError::Storage("memory store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9_-]` become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> CatalogResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> CatalogResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

/// Ordered list of source configurations keyed by name.
///
/// The whole list is read and written as one JSON document, so concurrent
/// writers are last-writer-wins.
pub struct SourceRegistry<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SourceRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All saved sources. A missing document is an empty list.
    pub fn load(&self) -> CatalogResult<Vec<SourceConfig>> {
        let Some(raw) = self.store.get(SOURCES_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw)
            .map_err(|e| CatalogError::Storage(format!("corrupt source list: {e}")))
    }

    /// Insert or overwrite-by-name in place.
    pub fn save(&self, config: SourceConfig) -> CatalogResult<()> {
        let mut configs = self.load()?;
        match configs.iter_mut().find(|c| c.name == config.name) {
            Some(existing) => *existing = config,
            None => configs.push(config),
        }
        self.write(&configs)
    }

    pub fn find(&self, name: &str) -> CatalogResult<Option<SourceConfig>> {
        Ok(self.load()?.into_iter().find(|c| c.name == name))
    }

    /// Remove by name, returning whether an entry was removed.
    pub fn remove(&self, name: &str) -> CatalogResult<bool> {
        let mut configs = self.load()?;
        let before = configs.len();
        configs.retain(|c| c.name != name);
        if configs.len() == before {
            return Ok(false);
        }
        self.write(&configs)?;
        Ok(true)
    }

    fn write(&self, configs: &[SourceConfig]) -> CatalogResult<()> {
        let raw = serde_json::to_string_pretty(configs)
            .map_err(|e| CatalogError::Storage(format!("Serialization failed: {e}")))?;
        self.store.set(SOURCES_KEY, &raw)
    }
}
