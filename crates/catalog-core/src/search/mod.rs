//! Catalog search for Catalog clients
//!
//! [`CatalogSearch`] owns the cached catalog and the current search state. Each
//! call to [`CatalogSearch::set_params`] normalizes the incoming parameters,
//! loads the catalog on first use, and recomputes the [`ResultWindow`].

mod params;
pub mod pipeline;

pub use params::{parse_params, RawParams, SearchState, SortField, SortOrder};
pub use pipeline::{run_pipeline, ResultWindow};

use crate::config::DEFAULT_PAGE_LIMIT;
use crate::loader::CatalogLoader;
use crate::models::Entry;
use crate::policy::PolicyProvider;

/// Lifecycle of the cached catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded,
    Failed,
}

/// Search orchestrator over a catalog fetched once through `L`.
pub struct CatalogSearch<L, P> {
    loader: L,
    policy: P,
    limit: usize,
    state: SearchState,
    catalog: Vec<Entry>,
    load_state: LoadState,
    last_error: Option<String>,
    window: ResultWindow,
}

impl<L, P> CatalogSearch<L, P>
where
    L: CatalogLoader,
    P: PolicyProvider,
{
    /// Create an orchestrator with the default page size.
    pub fn new(loader: L, policy: P) -> Self {
        Self::with_limit(loader, policy, DEFAULT_PAGE_LIMIT)
    }

    pub fn with_limit(loader: L, policy: P, limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            loader,
            policy,
            limit,
            state: SearchState {
                limit,
                ..SearchState::default()
            },
            catalog: Vec::new(),
            load_state: LoadState::Unloaded,
            last_error: None,
            window: ResultWindow::default(),
        }
    }

    /// Replace the search state and refresh results.
    ///
    /// The catalog is fetched on the first call and cached afterwards. A load
    /// failure is recorded in [`Self::loading_error`] and leaves the results
    /// untouched; the next call tries again.
    pub async fn set_params(&mut self, raw: &RawParams) {
        self.state = parse_params(raw, self.limit);

        if self.load_state != LoadState::Loaded && !self.load_catalog().await {
            return;
        }

        self.refresh();
    }

    /// Re-run the pipeline against the cached catalog, e.g. after a policy
    /// change. Does nothing until the catalog is loaded.
    pub fn refresh(&mut self) {
        if self.load_state != LoadState::Loaded {
            return;
        }

        self.window = run_pipeline(&self.catalog, &self.state, &self.policy);
        tracing::debug!(
            query = %self.state.query,
            sorting = %self.state.sorting,
            order = %self.state.order,
            page = self.state.page,
            count = self.window.count,
            "Search completed"
        );
    }

    async fn load_catalog(&mut self) -> bool {
        if self.load_state == LoadState::Loading {
            tracing::warn!("Previous catalog load was abandoned; starting a new one");
        }
        self.load_state = LoadState::Loading;

        match self.loader.load().await {
            Ok(entries) => {
                tracing::info!(entries = entries.len(), "Catalog loaded");
                self.catalog = entries;
                self.load_state = LoadState::Loaded;
                self.last_error = None;
                true
            }
            Err(error) => {
                tracing::warn!(%error, "Catalog load failed");
                self.catalog.clear();
                self.load_state = LoadState::Failed;
                self.last_error = Some(error.to_string());
                false
            }
        }
    }

    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    pub const fn window(&self) -> &ResultWindow {
        &self.window
    }

    /// Entries on the current page.
    pub fn results(&self) -> &[Entry] {
        &self.window.results
    }

    pub const fn count(&self) -> usize {
        self.window.count
    }

    pub const fn page_count(&self) -> usize {
        self.window.page_count
    }

    pub const fn from(&self) -> usize {
        self.window.from
    }

    pub const fn to(&self) -> usize {
        self.window.to
    }

    pub const fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// A catalog request is outstanding.
    pub fn searching(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// The most recent catalog load failed.
    pub fn loading_error(&self) -> bool {
        self.load_state == LoadState::Failed
    }

    /// Message of the most recent load failure, cleared by a successful load.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn loaded(&self) -> bool {
        self.load_state == LoadState::Loaded
    }

    /// Number of entries in the cached catalog.
    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    /// Mutable access to the policy; call [`Self::refresh`] afterwards.
    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }
}
