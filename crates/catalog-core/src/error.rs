//! Error types for catalog-core

use thiserror::Error;

/// Result type alias using catalog-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in catalog-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Catalog endpoint answered with a non-success status
    #[error("Catalog endpoint returned HTTP {status}: {body}")]
    CatalogStatus { status: u16, body: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
