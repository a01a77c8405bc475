//! Commission catalog: turns arbitrarily-shaped third-party taxonomy payloads
//! into a canonical two-level category tree with commission rates.
//!
//! The default source is tried through a fixed chain of request attempts and
//! degrades to a static catalog; user-configured sources go through a single
//! attempt with an explicit field mapping and report their failures.

pub mod catalog;
pub mod decode;
pub mod discovery;
pub mod fields;
pub mod http;
pub mod mapping;
pub mod path;
pub mod pipeline;
pub mod profit;
pub mod source;
pub mod store;
pub mod types;

pub use catalog::{find_category, flatten, static_catalog, CategoryMatch};
pub use decode::{decode_body, ResponseFormat};
pub use discovery::{discover_categories, normalize_items, scan_for_categories};
pub use http::{HttpExecutor, HttpOutcome, HttpRequest};
pub use mapping::{normalize_with_mapping, FieldMapping};
pub use path::extract_path;
pub use pipeline::{FetchOrchestrator, FetchOutcome, FetchState};
pub use profit::{calculate_profit, ProfitBreakdown, ProfitInput};
pub use source::{AuthType, HttpMethod, SourceConfig};
pub use store::{FileStore, KeyValueStore, MemoryStore, SourceRegistry};
pub use types::*;
