//! catalog-core - Core library for Catalog
//!
//! This crate contains the entry model, search policy, catalog loaders, and the
//! filter/sort/prioritize/paginate pipeline used by every Catalog interface.

pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod policy;
pub mod search;
pub mod util;

pub use error::{Error, Result};
pub use models::{Entry, SearchConfig, SearchFields};
pub use policy::{PolicyProvider, StaticPolicy};
pub use search::{CatalogSearch, RawParams, ResultWindow, SearchState};
