//! Response body decoding.
//!
//! Only JSON is parsed. XML and CSV bodies are wrapped verbatim in a
//! single-field object, so mapping-based normalization of those formats
//! yields no categories.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::types::CatalogResult;

/// Field holding a raw XML body.
pub const RAW_XML_FIELD: &str = "rawXml";

/// Field holding a raw CSV body.
pub const RAW_CSV_FIELD: &str = "rawCsv";

/// Declared format of a response body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
    Csv,
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Xml => "xml",
            ResponseFormat::Csv => "csv",
        };
        f.write_str(s)
    }
}

/// Turn a raw body into a structured value according to its declared format.
pub fn decode_body(body: &str, format: ResponseFormat) -> CatalogResult<Value> {
    match format {
        ResponseFormat::Json => Ok(serde_json::from_str(body)?),
        ResponseFormat::Xml => Ok(json!({ RAW_XML_FIELD: body })),
        ResponseFormat::Csv => Ok(json!({ RAW_CSV_FIELD: body })),
    }
}
