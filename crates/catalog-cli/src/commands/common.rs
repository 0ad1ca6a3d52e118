use std::path::Path;

use catalog_core::config::{CatalogConfig, CatalogSource};
use catalog_core::loader::SourceLoader;
use catalog_core::util::preview_text;
use catalog_core::{CatalogSearch, Entry, ResultWindow, SearchState, StaticPolicy};

use crate::error::CliError;

const NAME_WIDTH: usize = 28;
const OWNER_WIDTH: usize = 18;
const DESCRIPTION_PREVIEW_CHARS: usize = 60;

/// Everything a search command needs, resolved from flags and environment.
#[derive(Debug, Clone)]
pub struct SearchContext {
    pub source: CatalogSource,
    pub config: CatalogConfig,
    pub policy: StaticPolicy,
}

/// Apply command-line overrides on top of the environment configuration.
pub fn resolve_context(
    catalog: Option<&str>,
    policy_path: Option<&Path>,
    limit: Option<usize>,
    mut config: CatalogConfig,
) -> Result<SearchContext, CliError> {
    if let Some(location) = catalog {
        match CatalogSource::parse(location) {
            Some(CatalogSource::Http(url)) => {
                config.catalog_url = Some(url);
                config.catalog_path = None;
            }
            Some(CatalogSource::File(path)) => {
                config.catalog_url = None;
                config.catalog_path = Some(path);
            }
            None => return Err(CliError::Config("--catalog must not be empty".to_string())),
        }
    }
    if let Some(limit) = limit {
        config.page_limit = limit;
    }
    config.validate()?;

    let source = config.source().ok_or(CliError::CatalogNotConfigured)?;
    let policy = match policy_path {
        Some(path) => load_policy(path)?,
        None => StaticPolicy::default(),
    };

    Ok(SearchContext {
        source,
        config,
        policy,
    })
}

pub fn load_policy(path: &Path) -> Result<StaticPolicy, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|error| {
        CliError::Config(format!(
            "Failed to read policy at {}: {}",
            path.display(),
            error
        ))
    })?;
    let policy = StaticPolicy::from_json_str(&raw).map_err(|error| {
        CliError::Config(format!(
            "Failed to parse policy at {}: {}",
            path.display(),
            error
        ))
    })?;

    tracing::debug!(
        ignored = policy.ignored_len(),
        whitelisted = policy.whitelist_len(),
        "Loaded policy"
    );
    Ok(policy)
}

pub fn open_search(
    context: &SearchContext,
) -> Result<CatalogSearch<SourceLoader, StaticPolicy>, CliError> {
    let loader = SourceLoader::from_source(context.source.clone(), context.config.http_timeout())?;
    Ok(CatalogSearch::with_limit(
        loader,
        context.policy.clone(),
        context.config.page_limit,
    ))
}

pub fn describe_source(source: &CatalogSource) -> String {
    match source {
        CatalogSource::Http(url) => url.clone(),
        CatalogSource::File(path) => path.display().to_string(),
    }
}

pub fn format_window_header(window: &ResultWindow, state: &SearchState) -> String {
    if window.count == 0 {
        "No matching packages".to_string()
    } else if window.results.is_empty() {
        format!(
            "No results on page {} ({} matches across {} pages)",
            state.page, window.count, window.page_count
        )
    } else {
        format!(
            "Showing {}-{} of {} (page {}/{})",
            window.from, window.to, window.count, state.page, window.page_count
        )
    }
}

pub fn format_entry_lines(entries: &[Entry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            let name = preview_text(&entry.name, NAME_WIDTH);
            let owner = preview_text(&entry.owner, OWNER_WIDTH);
            let stars = entry
                .stars
                .map_or_else(|| "-".to_string(), |stars| stars.to_string());
            let updated = format_updated(entry);
            let description = entry
                .description
                .as_deref()
                .map(|description| preview_text(description, DESCRIPTION_PREVIEW_CHARS))
                .unwrap_or_default();

            format!(
                "{name:<NAME_WIDTH$}  {owner:<OWNER_WIDTH$}  {stars:>7}  {updated:<10}  {description}"
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

/// Calendar date of the last update, or the raw value when it isn't a date.
pub fn format_updated(entry: &Entry) -> String {
    match (entry.updated_at(), entry.updated.as_deref()) {
        (Some(updated), _) => updated.format("%Y-%m-%d").to_string(),
        (None, Some(raw)) => preview_text(raw, 10),
        (None, None) => "-".to_string(),
    }
}
