//! Search behavior settings model

use serde::{Deserialize, Serialize};

/// Which entry fields participate in text matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchFields {
    /// Match against the package name
    pub name: bool,
    /// Match against the package description
    pub description: bool,
    /// Match against the package owner
    pub owner: bool,
}

impl Default for SearchFields {
    fn default() -> Self {
        Self {
            name: true,
            description: true,
            owner: true,
        }
    }
}

/// Search settings read by the pipeline on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Hide ignored packages and non-canonical packages sharing a website
    pub ignore_deprecated_packages: bool,
    /// Fields used for text matching
    pub search_field: SearchFields,
    /// Pin an exact name match to the top of the results
    pub exact_match: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ignore_deprecated_packages: true,
            search_field: SearchFields::default(),
            exact_match: true,
        }
    }
}

impl SearchConfig {
    /// Whether exact-match pinning applies for this configuration.
    pub const fn pins_exact_match(&self) -> bool {
        self.exact_match && self.search_field.name
    }
}
