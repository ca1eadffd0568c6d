//! Content sources for the catalog.
//!
//! A source hands back opaque JSON per content kind; normalization happens in
//! the parent module.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ContentKind;
use crate::config::CatalogConfig;

/// Catalog bundled with the binary
pub const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Which content source to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSourceKind {
    /// Bundled sample catalog
    #[default]
    Embedded,
    /// A JSON document on disk with `departments`, `doctors` and `services` keys
    File,
    /// A content API serving `{base_url}/{kind}`
    Http,
}

/// Supplies raw content payloads
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Fetch the payload for one content kind
    async fn fetch(&self, kind: ContentKind) -> Result<Value>;
}

/// Build the configured content source
pub fn content_source_from_config(config: &CatalogConfig) -> Result<Box<dyn ContentSource>> {
    match config.source {
        ContentSourceKind::Embedded => Ok(Box::new(EmbeddedContent)),
        ContentSourceKind::File => {
            let Some(path) = &config.path else {
                bail!("catalog.path is required when catalog.source = \"file\"");
            };
            Ok(Box::new(FileContent::new(path)))
        }
        ContentSourceKind::Http => {
            let Some(base_url) = &config.base_url else {
                bail!("catalog.base_url is required when catalog.source = \"http\"");
            };
            Ok(Box::new(HttpContent::new(
                base_url,
                Duration::from_secs(config.timeout_secs),
                config.max_retries,
            )?))
        }
    }
}

/// Pull one kind out of a combined catalog document
fn select(document: &Value, kind: ContentKind) -> Result<Value> {
    document
        .get(kind.key())
        .cloned()
        .with_context(|| format!("Catalog document has no '{}' key", kind.key()))
}

/// Bundled sample catalog
pub struct EmbeddedContent;

#[async_trait]
impl ContentSource for EmbeddedContent {
    fn name(&self) -> &'static str {
        "embedded"
    }

    async fn fetch(&self, kind: ContentKind) -> Result<Value> {
        let document: Value =
            serde_json::from_str(EMBEDDED_CATALOG).context("Embedded catalog is not valid JSON")?;
        select(&document, kind)
    }
}

/// Catalog document read from disk
pub struct FileContent {
    path: PathBuf,
}

impl FileContent {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContentSource for FileContent {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch(&self, kind: ContentKind) -> Result<Value> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read catalog file {:?}", self.path))?;
        let document: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Catalog file {:?} is not valid JSON", self.path))?;
        select(&document, kind)
    }
}

/// Content API over HTTP with exponential backoff on failures
pub struct HttpContent {
    client: reqwest::Client,
    base_url: String,
    max_retries: usize,
}

impl HttpContent {
    pub fn new(base_url: &str, timeout: Duration, max_retries: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("careflow/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries,
        })
    }

    pub fn url_for(&self, kind: ContentKind) -> String {
        format!("{}/{}", self.base_url, kind.key())
    }

    async fn fetch_once(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("Content API returned an error for {url}"))?;
        response
            .json::<Value>()
            .await
            .with_context(|| format!("Content API returned invalid JSON for {url}"))
    }
}

#[async_trait]
impl ContentSource for HttpContent {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, kind: ContentKind) -> Result<Value> {
        let url = self.url_for(kind);
        let strategy = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(200))
            .with_max_delay(Duration::from_secs(5))
            .with_max_times(self.max_retries);

        (|| async { self.fetch_once(&url).await })
            .retry(strategy)
            .notify(|err, delay| {
                tracing::warn!(url = %url, error = %err, ?delay, "content fetch failed, retrying");
            })
            .await
    }
}
