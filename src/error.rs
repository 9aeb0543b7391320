//! Error types for the catalog browser
//!
//! Each concern owns a small thiserror enum; [`CatalogError`] aggregates them
//! for callers that only need a single error type.

use thiserror::Error;

/// Main error type for the catalog browser
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Seed error: {0}")]
    Seed(#[from] SeedError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Key-value backend errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage backend unavailable: {message}")]
    Unavailable { message: String },

    #[error("Failed to read key '{key}': {message}")]
    Read { key: String, message: String },

    #[error("Failed to write key '{key}': {message}")]
    Write { key: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Seed resource errors
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Invalid seed URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Seed request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Seed request returned HTTP {status}")]
    Status { status: u16 },

    #[error("Seed payload is not a product list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Product '{id}' not found")]
    NotFound { id: String },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
