//! Data models for Catalog

mod entry;
mod search_config;

pub use entry::Entry;
pub use search_config::{SearchConfig, SearchFields};
