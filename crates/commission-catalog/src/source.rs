//! User-configured category sources.

use std::collections::BTreeMap;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::decode::ResponseFormat;
use crate::mapping::FieldMapping;
use crate::types::{CatalogError, CatalogResult};

/// Header carrying the raw key for [`AuthType::ApiKey`].
pub const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP method of a source request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
}

impl HttpMethod {
    /// Only POST and PUT requests carry a body.
    pub fn allows_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the credential in [`SourceConfig::api_key`] is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    #[default]
    None,
    #[serde(rename = "apikey")]
    ApiKey,
    Bearer,
    Basic,
}

impl AuthType {
    /// The header this auth type adds for `key`, if any.
    ///
    /// Basic auth expects `key` in `user:pass` form and base64-encodes it.
    /// An empty key adds nothing.
    pub fn header(self, key: &str) -> Option<(String, String)> {
        if key.is_empty() {
            return None;
        }
        match self {
            AuthType::None => None,
            AuthType::ApiKey => Some((API_KEY_HEADER.to_string(), key.to_string())),
            AuthType::Bearer => Some(("Authorization".to_string(), format!("Bearer {key}"))),
            AuthType::Basic => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(key);
                Some(("Authorization".to_string(), format!("Basic {encoded}")))
            }
        }
    }
}

/// A user-declared category source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    pub name: String,
    pub endpoint: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub auth_type: AuthType,
    #[serde(default)]
    pub response_format: ResponseFormat,
    #[serde(default)]
    pub data_path: String,
    #[serde(default)]
    pub field_mapping: FieldMapping,
}

impl SourceConfig {
    /// A GET source with defaults for everything but name and endpoint.
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            method: HttpMethod::Get,
            headers: BTreeMap::new(),
            body: None,
            api_key: String::new(),
            auth_type: AuthType::None,
            response_format: ResponseFormat::Json,
            data_path: String::new(),
            field_mapping: FieldMapping::identity(),
        }
    }

    /// Known preset configurations: `trendyol`, `nesatilir`, `custom`.
    pub fn preset(key: &str) -> Option<Self> {
        let json_headers = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>()
        };

        match key {
            "trendyol" => Some(Self {
                headers: json_headers(&[("Accept", "application/json")]),
                auth_type: AuthType::ApiKey,
                data_path: "data.categories".to_string(),
                ..Self::new("Trendyol API", "https://api.trendyol.com/categories")
            }),
            "nesatilir" => Some(Self {
                method: HttpMethod::Post,
                headers: json_headers(&[
                    ("Content-Type", "application/json"),
                    ("Accept", "application/json"),
                ]),
                body: Some("{}".to_string()),
                data_path: "data".to_string(),
                ..Self::new(
                    "Nesatilir API",
                    "https://api.nesatilir.com/api/v1/GetCategoriesForCalculator",
                )
            }),
            "custom" => Some(Self::new("Custom API", "")),
            _ => None,
        }
    }

    /// Names accepted by [`SourceConfig::preset`].
    pub fn preset_names() -> &'static [&'static str] {
        &["trendyol", "nesatilir", "custom"]
    }

    /// Fail with a configuration error when no endpoint is set.
    pub fn ensure_endpoint(&self) -> CatalogResult<()> {
        if self.endpoint.trim().is_empty() {
            return Err(CatalogError::Config(format!(
                "source '{}' has no endpoint",
                self.name
            )));
        }
        Ok(())
    }

    /// Declared headers plus the computed auth header.
    ///
    /// The auth header replaces any declared header of the same name,
    /// compared case-insensitively.
    pub fn request_headers(&self) -> Vec<(String, String)> {
        let mut headers: Vec<(String, String)> = self
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if let Some((name, value)) = self.auth_type.header(&self.api_key) {
            headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }
        headers
    }

    /// The body to send: only for POST/PUT and only when non-empty.
    pub fn request_body(&self) -> Option<&str> {
        self.body
            .as_deref()
            .filter(|body| self.method.allows_body() && !body.is_empty())
    }
}
