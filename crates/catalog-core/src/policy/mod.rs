//! Search policy: ignore list, website whitelist, and active search settings.
//!
//! The pipeline only talks to policy through [`PolicyProvider`], so callers can
//! back it with whatever settings store they have. [`StaticPolicy`] is the
//! in-memory implementation used by the CLI and tests.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::models::SearchConfig;
use crate::Result;

/// Read-only view of the rules governing which entries are eligible.
pub trait PolicyProvider {
    /// Active search settings.
    fn config(&self) -> SearchConfig;

    /// Whether `name` is on the ignore list.
    fn is_ignored(&self, name: &str) -> bool;

    /// Canonical package name registered for `website`, if any.
    fn canonical_name(&self, website: &str) -> Option<&str>;
}

/// In-memory policy built from already-parsed tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticPolicy {
    config: SearchConfig,
    ignore: HashSet<String>,
    whitelist: HashMap<String, String>,
}

impl StaticPolicy {
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Add names to the ignore list.
    #[must_use]
    pub fn with_ignored<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.extend(names.into_iter().map(Into::into));
        self
    }

    /// Register `name` as the only package allowed to use `website`.
    #[must_use]
    pub fn with_whitelisted(mut self, website: impl Into<String>, name: impl Into<String>) -> Self {
        self.whitelist.insert(website.into(), name.into());
        self
    }

    /// Replace the active search settings.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Parse a policy document.
    ///
    /// ```json
    /// { "config": { "exact_match": true }, "ignore": ["old-pkg"], "whitelist": { "https://site": "pkg" } }
    /// ```
    ///
    /// Every key is optional; unknown keys are rejected.
    pub fn from_json_str(payload: &str) -> Result<Self> {
        let document: PolicyDocument = serde_json::from_str(payload)?;
        Ok(Self {
            config: document.config,
            ignore: document.ignore.into_iter().collect(),
            whitelist: document.whitelist,
        })
    }

    pub fn ignored_len(&self) -> usize {
        self.ignore.len()
    }

    pub fn whitelist_len(&self) -> usize {
        self.whitelist.len()
    }
}

impl PolicyProvider for StaticPolicy {
    fn config(&self) -> SearchConfig {
        self.config
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.ignore.contains(name)
    }

    fn canonical_name(&self, website: &str) -> Option<&str> {
        self.whitelist.get(website).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Private
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyDocument {
    #[serde(default)]
    config: SearchConfig,
    #[serde(default)]
    ignore: Vec<String>,
    #[serde(default)]
    whitelist: HashMap<String, String>,
}
