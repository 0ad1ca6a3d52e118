//! Catalog entry model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single package record in the catalog.
///
/// Entries are immutable once loaded; the search pipeline only ever borrows
/// them and clones the ones that land on the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Package name, unique within a catalog
    pub name: String,
    /// Owner (user or organization) publishing the package
    pub owner: String,
    /// Free-form package description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Project website or repository URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Star count, `None` when the catalog omits it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,
    /// Last update time exactly as the catalog sends it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

impl Entry {
    /// Create an entry with only the required fields set.
    #[must_use]
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            description: None,
            website: None,
            stars: None,
            updated: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    #[must_use]
    pub fn with_stars(mut self, stars: u64) -> Self {
        self.stars = Some(stars);
        self
    }

    #[must_use]
    pub fn with_updated(mut self, updated: impl Into<String>) -> Self {
        self.updated = Some(updated.into());
        self
    }

    /// Interpret `updated` as RFC 3339 or a bare `YYYY-MM-DD` date.
    ///
    /// Other formats yield `None`; the raw value is still used for sorting.
    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.updated.as_deref()?.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}
