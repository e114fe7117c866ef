//! Error types shared across the Flickpick crates.
//!
//! Per-request recommendation calls never fail; everything here describes
//! startup and resource-loading failures.

/// Result alias used by loaders and service construction.
pub type Result<T> = std::result::Result<T, FlickpickError>;

#[derive(Debug, thiserror::Error)]
pub enum FlickpickError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    #[error("Similarity table load error: {0}")]
    SimilarityLoad(String),

    #[error("Similarity table is {rows}x{cols} but the catalog has {catalog} rows")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        catalog: usize,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for FlickpickError {
    fn from(err: anyhow::Error) -> Self {
        FlickpickError::Internal(err.to_string())
    }
}

impl From<std::io::Error> for FlickpickError {
    fn from(err: std::io::Error) -> Self {
        FlickpickError::Internal(err.to_string())
    }
}
