//! Async HTTP request executor wrapping reqwest.
//!
//! One attempt per call: no retries, no backoff. A non-2xx status is a normal
//! outcome handed back to the caller; only transport failures are errors.

use std::time::Duration;

use crate::source::{HttpMethod, SourceConfig};
use crate::types::{CatalogError, CatalogResult};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const USER_AGENT: &str = concat!("commission-catalog/", env!("CARGO_PKG_VERSION"));

/// A fully-built request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Build the request described by a source configuration.
    pub fn from_source(config: &SourceConfig) -> Self {
        Self {
            method: config.method,
            url: config.endpoint.clone(),
            headers: config.request_headers(),
            body: config.request_body().map(str::to_string),
        }
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone)]
pub struct HttpOutcome {
    /// HTTP status code.
    pub status: u16,
    /// Canonical reason phrase for the status, empty when unknown.
    pub reason: String,
    /// Response body as text.
    pub body: String,
}

impl HttpOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body of a 2xx response, or an `HttpStatus` error.
    pub fn into_body(self) -> CatalogResult<String> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(CatalogError::HttpStatus {
                status: self.status,
                reason: self.reason,
            })
        }
    }
}

/// HTTP client for category sources.
#[derive(Clone)]
pub struct HttpExecutor {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpExecutor {
    /// Create an executor whose requests time out after `timeout_ms`.
    pub fn new(timeout_ms: u64) -> Self {
        let timeout = Duration::from_millis(timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();

        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send one request. Non-2xx responses come back as `Ok`.
    pub async fn execute(&self, request: &HttpRequest) -> CatalogResult<HttpOutcome> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        };

        let mut builder = self
            .client
            .request(method, &request.url)
            .timeout(self.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        tracing::debug!("{} {}", request.method, request.url);
        let response = builder.send().await?;
        read_outcome(response).await
    }

    /// Send a HEAD request to `url`.
    pub async fn head(&self, url: &str) -> CatalogResult<HttpOutcome> {
        let response = self
            .client
            .head(url)
            .header("Accept", "application/json")
            .timeout(self.timeout)
            .send()
            .await?;
        read_outcome(response).await
    }
}

impl Default for HttpExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_MS)
    }
}

async fn read_outcome(response: reqwest::Response) -> CatalogResult<HttpOutcome> {
    let status = response.status();
    let body = response.text().await?;
    Ok(HttpOutcome {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("").to_string(),
        body,
    })
}
