//! Runtime configuration for catalog clients.
//!
//! Provides `CatalogConfig`, which tells a client where to fetch the catalog
//! from and how results are paged.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::util::{is_http_url, normalize_text_option};
use crate::{Error, Result};

pub const DEFAULT_PAGE_LIMIT: usize = 20;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

const ENV_CATALOG_URL: &str = "CATALOG_URL";
const ENV_CATALOG_PATH: &str = "CATALOG_PATH";
const ENV_PAGE_LIMIT: &str = "CATALOG_PAGE_LIMIT";
const ENV_HTTP_TIMEOUT: &str = "CATALOG_HTTP_TIMEOUT_SECS";

/// Client configuration for catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Remote catalog endpoint (JSON array of entries)
    #[serde(default)]
    pub catalog_url: Option<String>,
    /// Local catalog file, used when no URL is configured
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Entries per results page
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,
    /// Timeout applied to the catalog HTTP request
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            catalog_url: None,
            catalog_path: None,
            page_limit: DEFAULT_PAGE_LIMIT,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

/// Where the catalog is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Http(String),
    File(PathBuf),
}

impl CatalogSource {
    /// Interpret a user-supplied location: `http(s)://` is remote, anything
    /// else is a local path.
    pub fn parse(location: &str) -> Option<Self> {
        let location = normalize_text_option(Some(location.to_string()))?;
        if is_http_url(&location) {
            Some(Self::Http(location))
        } else {
            Some(Self::File(PathBuf::from(location)))
        }
    }
}

impl CatalogConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Public for testability; `from_env` delegates here.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            catalog_url: normalize_text_option(lookup(ENV_CATALOG_URL)),
            catalog_path: normalize_text_option(lookup(ENV_CATALOG_PATH)).map(PathBuf::from),
            ..Self::default()
        };

        if let Some(raw) = normalize_text_option(lookup(ENV_PAGE_LIMIT)) {
            config.page_limit = parse_number(&raw, ENV_PAGE_LIMIT)?;
        }
        if let Some(raw) = normalize_text_option(lookup(ENV_HTTP_TIMEOUT)) {
            config.http_timeout_secs = parse_number(&raw, ENV_HTTP_TIMEOUT)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde defaults cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.page_limit == 0 {
            return Err(Error::InvalidConfig(
                "page_limit must be greater than zero".to_string(),
            ));
        }
        if let Some(url) = &self.catalog_url {
            if !is_http_url(url) {
                return Err(Error::InvalidConfig(format!(
                    "catalog_url must include http:// or https:// (got '{url}')"
                )));
            }
        }
        Ok(())
    }

    /// Resolve the catalog source, preferring the URL over the local path.
    pub fn source(&self) -> Option<CatalogSource> {
        if let Some(url) = normalize_text_option(self.catalog_url.clone()) {
            return Some(CatalogSource::Http(url));
        }
        self.catalog_path.clone().map(CatalogSource::File)
    }

    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

const fn default_page_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

const fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

fn parse_number<T: std::str::FromStr>(raw: &str, key: &str) -> Result<T> {
    raw.parse::<T>()
        .map_err(|_| Error::InvalidConfig(format!("{key} must be a non-negative integer")))
}
