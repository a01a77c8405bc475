//! Fetch orchestration: the default multi-attempt chain, single configured
//! sources, and the diagnostic probes built on the same executor.

use serde::Serialize;
use serde_json::Value;

use crate::catalog::static_catalog;
use crate::decode::{decode_body, ResponseFormat};
use crate::discovery::discover_categories;
use crate::http::{HttpExecutor, HttpRequest};
use crate::mapping::normalize_with_mapping;
use crate::path::extract_path;
use crate::source::{HttpMethod, SourceConfig};
use crate::types::{CatalogError, CatalogResult, Category};

/// Origin the default attempt table is resolved against.
pub const DEFAULT_ORIGIN: &str = "https://api.nesatilir.com";

/// Number of sample categories kept in a source test report.
pub const SAMPLE_SIZE: usize = 3;

const CALCULATOR_UA: (&str, &str) = ("User-Agent", "TrendyolCalculator/1.0");
const ACCEPT_JSON: (&str, &str) = ("Accept", "application/json");
const CONTENT_JSON: (&str, &str) = ("Content-Type", "application/json");

/// One entry of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttemptSpec {
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path and query appended to the origin.
    pub path: &'static str,
    pub headers: &'static [(&'static str, &'static str)],
    pub body: Option<&'static str>,
}

impl AttemptSpec {
    /// Resolve this attempt against `origin`.
    pub fn request(&self, origin: &str) -> HttpRequest {
        HttpRequest {
            method: self.method,
            url: format!("{}{}", origin.trim_end_matches('/'), self.path),
            headers: self
                .headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: self.body.map(str::to_string),
        }
    }
}

/// The default fallback chain. Order is significant.
pub const ATTEMPTS: &[AttemptSpec] = &[
    AttemptSpec {
        name: "POST with empty JSON",
        method: HttpMethod::Post,
        path: "/api/v1/GetCategoriesForCalculator",
        headers: &[CONTENT_JSON, ACCEPT_JSON, CALCULATOR_UA],
        body: Some("{}"),
    },
    AttemptSpec {
        name: "POST with request parameter",
        method: HttpMethod::Post,
        path: "/api/v1/GetCategoriesForCalculator",
        headers: &[CONTENT_JSON, ACCEPT_JSON],
        body: Some(r#"{"request":"categories"}"#),
    },
    AttemptSpec {
        name: "POST with action parameter",
        method: HttpMethod::Post,
        path: "/api/v1/GetCategoriesForCalculator",
        headers: &[CONTENT_JSON, ACCEPT_JSON],
        body: Some(r#"{"action":"GetCategoriesForCalculator"}"#),
    },
    AttemptSpec {
        name: "GET request",
        method: HttpMethod::Get,
        path: "/api/v1/GetCategoriesForCalculator",
        headers: &[ACCEPT_JSON, CALCULATOR_UA],
        body: None,
    },
    AttemptSpec {
        name: "GET with query params",
        method: HttpMethod::Get,
        path: "/api/v1/GetCategoriesForCalculator?format=json",
        headers: &[ACCEPT_JSON],
        body: None,
    },
    AttemptSpec {
        name: "Alternative endpoint v2",
        method: HttpMethod::Post,
        path: "/api/v2/GetCategoriesForCalculator",
        headers: &[CONTENT_JSON, ACCEPT_JSON],
        body: Some("{}"),
    },
    AttemptSpec {
        name: "Simple categories endpoint",
        method: HttpMethod::Get,
        path: "/categories",
        headers: &[ACCEPT_JSON],
        body: None,
    },
    AttemptSpec {
        name: "Calculator categories endpoint",
        method: HttpMethod::Get,
        path: "/calculator/categories",
        headers: &[ACCEPT_JSON],
        body: None,
    },
];

/// Progress of the default fetch chain.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    NotTried,
    /// Attempt at this zero-based table index is in flight.
    Trying(usize),
    Success {
        attempt: usize,
        categories: Vec<Category>,
    },
    ExhaustedFallback,
}

impl FetchState {
    /// Leave `NotTried` for the first of `total` attempts.
    pub fn begin(self, total: usize) -> Self {
        match self {
            FetchState::NotTried if total > 0 => FetchState::Trying(0),
            FetchState::NotTried => FetchState::ExhaustedFallback,
            other => other,
        }
    }

    /// Fold the result of the current attempt into the next state.
    ///
    /// Only a non-empty category list ends the chain early; anything else
    /// moves on, and running off the end of the table exhausts it.
    pub fn advance(self, result: CatalogResult<Vec<Category>>, total: usize) -> Self {
        match self {
            FetchState::Trying(i) => match result {
                Ok(categories) if !categories.is_empty() => FetchState::Success {
                    attempt: i,
                    categories,
                },
                _ if i + 1 < total => FetchState::Trying(i + 1),
                _ => FetchState::ExhaustedFallback,
            },
            other => other,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FetchState::Success { .. } | FetchState::ExhaustedFallback
        )
    }
}

/// Where a default-chain result came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CatalogSource {
    Live { attempt: usize, name: String },
    StaticFallback,
}

/// A recovered failure of one attempt in the chain.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptFailure {
    pub attempt: usize,
    pub name: String,
    pub kind: &'static str,
    pub message: String,
}

/// Result of the default chain. There is no error state.
#[derive(Debug, Clone, Serialize)]
pub struct FetchOutcome {
    pub categories: Vec<Category>,
    pub source: CatalogSource,
    pub failures: Vec<AttemptFailure>,
}

impl FetchOutcome {
    pub fn is_fallback(&self) -> bool {
        self.source == CatalogSource::StaticFallback
    }
}

/// Result of testing one configured source.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceTestReport {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories_found: Option<usize>,
    pub sample: Vec<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Raw view of one request for triaging discovery failures.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub decoded_body: Option<Value>,
    pub raw_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Ok,
    Warning,
    Error,
}

/// Reachability of the default origin.
#[derive(Debug, Clone, Serialize)]
pub struct ApiStatus {
    pub level: StatusLevel,
    pub message: String,
    pub details: String,
}

/// Drives category fetches through an [`HttpExecutor`].
#[derive(Clone)]
pub struct FetchOrchestrator {
    executor: HttpExecutor,
    origin: String,
    attempts: Vec<AttemptSpec>,
}

impl FetchOrchestrator {
    pub fn new(executor: HttpExecutor) -> Self {
        Self {
            executor,
            origin: DEFAULT_ORIGIN.to_string(),
            attempts: ATTEMPTS.to_vec(),
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_attempts(mut self, attempts: Vec<AttemptSpec>) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn attempts(&self) -> &[AttemptSpec] {
        &self.attempts
    }

    /// Run the fallback chain, degrading to the static catalog.
    pub async fn fetch_categories(&self) -> FetchOutcome {
        let total = self.attempts.len();
        let mut failures = Vec::new();
        let mut state = FetchState::NotTried.begin(total);

        while let FetchState::Trying(i) = state {
            let attempt = &self.attempts[i];
            tracing::debug!("Attempt {}/{}: {}", i + 1, total, attempt.name);

            let result = self.run_attempt(attempt).await;
            if let Err(e) = &result {
                tracing::warn!("Attempt '{}' failed: {}", attempt.name, e);
                failures.push(AttemptFailure {
                    attempt: i,
                    name: attempt.name.to_string(),
                    kind: e.kind(),
                    message: e.to_string(),
                });
            }
            state = state.advance(result, total);
        }

        match state {
            FetchState::Success {
                attempt,
                categories,
            } => {
                let name = self.attempts[attempt].name.to_string();
                tracing::info!("Loaded {} categories via '{}'", categories.len(), name);
                FetchOutcome {
                    categories,
                    source: CatalogSource::Live { attempt, name },
                    failures,
                }
            }
            _ => {
                tracing::warn!(
                    "All {} attempts failed, using static catalog",
                    total
                );
                FetchOutcome {
                    categories: static_catalog(),
                    source: CatalogSource::StaticFallback,
                    failures,
                }
            }
        }
    }

    async fn run_attempt(&self, attempt: &AttemptSpec) -> CatalogResult<Vec<Category>> {
        let request = attempt.request(&self.origin);
        let body = self.executor.execute(&request).await?.into_body()?;
        let decoded = decode_body(&body, ResponseFormat::Json)?;
        let categories = discover_categories(&decoded);
        if categories.is_empty() {
            return Err(CatalogError::EmptyResult);
        }
        Ok(categories)
    }

    /// Single attempt against a configured source. Zero categories is `Ok`.
    pub async fn fetch_source(&self, config: &SourceConfig) -> CatalogResult<Vec<Category>> {
        config.ensure_endpoint()?;

        let request = HttpRequest::from_source(config);
        let body = self.executor.execute(&request).await?.into_body()?;
        let decoded = decode_body(&body, config.response_format)?;
        let items = extract_path(&decoded, &config.data_path)
            .ok_or_else(|| CatalogError::PathNotFound(config.data_path.clone()))?;

        let categories = normalize_with_mapping(items, &config.field_mapping);
        tracing::debug!(
            "Source '{}' normalized {} categories",
            config.name,
            categories.len()
        );
        Ok(categories)
    }

    /// Fetch a configured source, treating zero categories as an error.
    pub async fn fetch_with_config(&self, config: &SourceConfig) -> CatalogResult<Vec<Category>> {
        let categories = self.fetch_source(config).await?;
        if categories.is_empty() {
            return Err(CatalogError::EmptyResult);
        }
        Ok(categories)
    }

    /// Test a configured source and summarize the result.
    pub async fn test_source(&self, config: &SourceConfig) -> SourceTestReport {
        match self.fetch_source(config).await {
            Ok(categories) => SourceTestReport {
                success: true,
                message: format!("Found {} categories", categories.len()),
                categories_found: Some(categories.len()),
                sample: categories.into_iter().take(SAMPLE_SIZE).collect(),
                error: None,
            },
            Err(e) => {
                tracing::warn!("Source '{}' test failed: {}", config.name, e);
                SourceTestReport {
                    success: false,
                    message: e.to_string(),
                    categories_found: None,
                    sample: Vec::new(),
                    error: Some(e.kind().to_string()),
                }
            }
        }
    }

    /// Execute the first attempt and report the raw response.
    pub async fn probe(&self) -> ProbeReport {
        let Some(attempt) = self.attempts.first() else {
            return ProbeReport {
                success: false,
                status: None,
                decoded_body: None,
                raw_text: String::new(),
                error: Some("no attempts configured".to_string()),
            };
        };

        let outcome = match self.executor.execute(&attempt.request(&self.origin)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                return ProbeReport {
                    success: false,
                    status: None,
                    decoded_body: None,
                    raw_text: String::new(),
                    error: Some(network_message(e)),
                }
            }
        };

        if !outcome.is_success() {
            return ProbeReport {
                success: false,
                status: Some(outcome.status),
                decoded_body: None,
                error: Some(format!("HTTP {}", outcome.status)),
                raw_text: outcome.body,
            };
        }

        match serde_json::from_str::<Value>(&outcome.body) {
            Ok(decoded) => ProbeReport {
                success: true,
                status: Some(outcome.status),
                decoded_body: Some(decoded),
                raw_text: outcome.body,
                error: None,
            },
            Err(_) => ProbeReport {
                success: false,
                status: Some(outcome.status),
                decoded_body: None,
                raw_text: outcome.body,
                error: Some("JSON parse failed".to_string()),
            },
        }
    }

    /// HEAD the origin itself.
    pub async fn check_status(&self) -> ApiStatus {
        match self.executor.head(&self.origin).await {
            Ok(outcome) if outcome.is_success() => ApiStatus {
                level: StatusLevel::Ok,
                message: "API reachable".to_string(),
                details: format!("Status: {}", outcome.status),
            },
            Ok(outcome) => ApiStatus {
                level: StatusLevel::Warning,
                message: "API responds with an error".to_string(),
                details: format!("Status: {} {}", outcome.status, outcome.reason),
            },
            Err(e) => ApiStatus {
                level: StatusLevel::Error,
                message: "API unreachable".to_string(),
                details: network_message(e),
            },
        }
    }
}

fn network_message(e: CatalogError) -> String {
    match e {
        CatalogError::Network(message) => message,
        other => other.to_string(),
    }
}
