use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] catalog_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "Catalog is not configured. Pass --catalog <URL|PATH>, or set CATALOG_URL or CATALOG_PATH."
    )]
    CatalogNotConfigured,
    #[error("Catalog could not be loaded from {location}: {reason}")]
    CatalogUnavailable { location: String, reason: String },
}
