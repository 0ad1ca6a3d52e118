//! Raw query parameters and their normalization into [`SearchState`].

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_PAGE_LIMIT;

const DEFAULT_PAGE: usize = 1;

/// Field used to order results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Owner,
    #[default]
    Stars,
    Updated,
}

impl SortField {
    /// Accept only the exact lowercase parameter spelling.
    pub fn parse_param(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::Name),
            "owner" => Some(Self::Owner),
            "stars" => Some(Self::Stars),
            "updated" => Some(Self::Updated),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Owner => "owner",
            Self::Stars => "stars",
            Self::Updated => "updated",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of the sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Accept only the exact lowercase parameter spelling.
    pub fn parse_param(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weakly typed parameters as they arrive from a URL or command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParams {
    /// Query text
    #[serde(default)]
    pub q: Option<String>,
    /// Page number
    #[serde(default)]
    pub p: Option<String>,
    /// Sort field
    #[serde(default)]
    pub s: Option<String>,
    /// Sort order
    #[serde(default)]
    pub o: Option<String>,
}

impl RawParams {
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.q = Some(query.into());
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.p = Some(page.into());
        self
    }

    #[must_use]
    pub fn with_sorting(mut self, sorting: impl Into<String>) -> Self {
        self.s = Some(sorting.into());
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.o = Some(order.into());
        self
    }

    /// Parse a URL query string such as `q=jquery&p=2&s=name&o=asc`.
    ///
    /// A leading `?` is allowed, values are percent-decoded with `+` read as a
    /// space, unknown keys are ignored and the last occurrence of a key wins.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(value);
            match decode_component(key).as_str() {
                "q" => params.q = Some(value),
                "p" => params.p = Some(value),
                "s" => params.s = Some(value),
                "o" => params.o = Some(value),
                _ => {}
            }
        }

        params
    }
}

/// Canonical search state derived from [`RawParams`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub query: String,
    /// 1-based page number, always at least 1
    pub page: usize,
    pub sorting: SortField,
    pub order: SortOrder,
    /// Entries per page
    pub limit: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: DEFAULT_PAGE,
            sorting: SortField::default(),
            order: SortOrder::default(),
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Normalize raw parameters into a complete [`SearchState`].
///
/// Never fails: anything unrecognized falls back to its default. The query is
/// kept verbatim; lowercasing happens inside the pipeline.
pub fn parse_params(raw: &RawParams, limit: usize) -> SearchState {
    SearchState {
        query: raw.q.clone().unwrap_or_default(),
        page: raw
            .p
            .as_deref()
            .and_then(parse_page)
            .unwrap_or(DEFAULT_PAGE),
        sorting: raw
            .s
            .as_deref()
            .and_then(SortField::parse_param)
            .unwrap_or_default(),
        order: raw
            .o
            .as_deref()
            .and_then(SortOrder::parse_param)
            .unwrap_or_default(),
        limit: limit.max(1),
    }
}

/// Integer prefix parse: leading whitespace, optional sign, then digits.
///
/// Returns `None` when there are no digits or the value is below 1.
fn parse_page(raw: &str) -> Option<usize> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest)
    } else {
        (false, trimmed.strip_prefix('+').unwrap_or(trimmed))
    };

    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if digits.is_empty() || negative {
        return None;
    }

    let page = digits.bytes().fold(0usize, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(usize::from(digit - b'0'))
    });
    (page >= 1).then_some(page)
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or_else(|_| spaced.clone(), Cow::into_owned)
}
