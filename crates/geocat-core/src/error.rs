//! Error types for geocat

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocatError {
    // Fixture setup errors
    #[error("Resource not found: {name}")]
    ResourceNotFound { name: String },

    #[error("Failed to copy {source_name} to {destination}: {source}")]
    FixtureCopy {
        source_name: String,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot express {path} as a file URL")]
    FileUrl { path: PathBuf },

    // Format errors
    #[error("No format for {path}")]
    NoFormat { path: PathBuf },

    #[error("No reader for {url}: {reason}")]
    NoReader { url: String, reason: String },

    #[error("Format mismatch for {path}: declared {declared}, found {found}")]
    FormatMismatch {
        path: PathBuf,
        declared: String,
        found: String,
    },

    #[error("{format} error: {reason}")]
    Format { format: String, reason: String },

    #[error("Feature type not found: {name}")]
    SchemaNotFound { name: String },

    #[error("Invalid style {name}: {reason}")]
    InvalidStyle { name: String, reason: String },

    // Referencing errors
    #[error("Unknown CRS: EPSG:{code}")]
    UnknownCrs { code: u32 },

    // Catalog state errors
    #[error("Catalog is read-only: {operation} is not supported")]
    ReadOnlyCatalog { operation: String },

    #[error("Catalog has already been finalized")]
    CatalogFinalized,

    #[error("Catalog has not been finalized. Commit the catalog scope first")]
    CatalogNotFinalized,

    #[error("No style registered before layer {layer}")]
    NoStyle { layer: String },

    #[error("Scope mismatch: {reason}")]
    ScopeMismatch { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GeocatError>;
