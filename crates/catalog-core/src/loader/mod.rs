//! Catalog loaders.
//!
//! A loader produces the full entry list in one shot. The search orchestrator
//! calls it at most once per successful load and caches the result.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::{CatalogConfig, CatalogSource};
use crate::models::Entry;
use crate::util::compact_text;
use crate::{Error, Result};

/// Source of the complete catalog.
#[allow(async_fn_in_trait)]
pub trait CatalogLoader {
    /// Fetch every entry in the catalog.
    async fn load(&self) -> Result<Vec<Entry>>;
}

/// Parse a catalog payload (a JSON array of entries).
///
/// Public for testability; callers can exercise parsing without I/O.
pub fn parse_catalog(payload: &str) -> Result<Vec<Entry>> {
    Ok(serde_json::from_str(payload)?)
}

/// Turn an HTTP status and body into a catalog or a status error.
///
/// Non-2xx responses become [`Error::CatalogStatus`] with the body compacted
/// for logging.
pub fn parse_catalog_response(status: u16, body: &str) -> Result<Vec<Entry>> {
    if !(200..300).contains(&status) {
        return Err(Error::CatalogStatus {
            status,
            body: compact_text(body),
        });
    }
    parse_catalog(body)
}

/// Fetches the catalog from an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpCatalogLoader {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogLoader {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl CatalogLoader for HttpCatalogLoader {
    async fn load(&self) -> Result<Vec<Entry>> {
        tracing::debug!(url = %self.url, "Fetching catalog");

        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        parse_catalog_response(status, &body)
    }
}

/// Reads the catalog from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileCatalogLoader {
    path: PathBuf,
}

impl FileCatalogLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogLoader for FileCatalogLoader {
    async fn load(&self) -> Result<Vec<Entry>> {
        tracing::debug!(path = %self.path.display(), "Reading catalog file");
        let payload = tokio::fs::read_to_string(&self.path).await?;
        parse_catalog(&payload)
    }
}

/// Serves a fixed in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogLoader {
    entries: Vec<Entry>,
}

impl StaticCatalogLoader {
    pub const fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

impl CatalogLoader for StaticCatalogLoader {
    async fn load(&self) -> Result<Vec<Entry>> {
        Ok(self.entries.clone())
    }
}

/// Loader chosen at runtime from configuration.
#[derive(Debug, Clone)]
pub enum SourceLoader {
    Http(HttpCatalogLoader),
    File(FileCatalogLoader),
}

impl SourceLoader {
    pub fn from_source(source: CatalogSource, timeout: Duration) -> Result<Self> {
        match source {
            CatalogSource::Http(url) => Ok(Self::Http(HttpCatalogLoader::new(url, timeout)?)),
            CatalogSource::File(path) => Ok(Self::File(FileCatalogLoader::new(path))),
        }
    }

    /// Build the loader described by `config`.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let source = config.source().ok_or_else(|| {
            Error::InvalidConfig("no catalog URL or path configured".to_string())
        })?;
        Self::from_source(source, config.http_timeout())
    }
}

impl CatalogLoader for SourceLoader {
    async fn load(&self) -> Result<Vec<Entry>> {
        match self {
            Self::Http(loader) => loader.load().await,
            Self::File(loader) => loader.load().await,
        }
    }
}
