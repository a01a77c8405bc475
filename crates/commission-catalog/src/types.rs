//! Core data types for the canonical category tree.

use serde::{Deserialize, Serialize};

/// Name given to items whose name could not be resolved.
///
/// Normalizers drop every item carrying this name, including items whose
/// source name happens to be this exact text.
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

/// Commission rate used when an item has no usable rate.
pub const DEFAULT_COMMISSION_RATE: f64 = 12.0;

/// A node in the canonical taxonomy tree.
///
/// Built fresh per fetch or parse call and never mutated afterwards. Ids are
/// not deduplicated, so placeholder ids may collide across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub commission_rate: f64,
    #[serde(default)]
    pub sub_categories: Vec<Category>,
}

impl Category {
    /// Create a leaf category.
    pub fn new(id: i64, name: impl Into<String>, commission_rate: f64) -> Self {
        Self {
            id,
            name: name.into(),
            commission_rate,
            sub_categories: Vec::new(),
        }
    }

    /// Attach subcategories.
    pub fn with_sub_categories(mut self, sub_categories: Vec<Category>) -> Self {
        self.sub_categories = sub_categories;
        self
    }

    /// Whether the name resolved to the unknown-category sentinel.
    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN_CATEGORY
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self
            .sub_categories
            .iter()
            .map(Category::node_count)
            .sum::<usize>()
    }
}

/// Errors that can occur while fetching or normalizing categories.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Data path '{0}' not found")]
    PathNotFound(String),

    #[error("No categories found in response")]
    EmptyResult,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Stable label for structured results.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::Config(_) => "ConfigError",
            CatalogError::Network(_) => "NetworkError",
            CatalogError::HttpStatus { .. } => "HttpStatusError",
            CatalogError::Decode(_) => "DecodeError",
            CatalogError::PathNotFound(_) => "PathNotFound",
            CatalogError::EmptyResult => "EmptyResult",
            CatalogError::Storage(_) | CatalogError::Io(_) => "StorageError",
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        CatalogError::Network(e.to_string())
    }
}

/// Convenience result type.
pub type CatalogResult<T> = Result<T, CatalogError>;
