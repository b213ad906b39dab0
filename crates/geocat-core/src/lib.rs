//! geocat core - catalog models, query port, and format providers
//!
//! This crate contains the catalog entity models, the `Catalog` query trait that
//! production code programs against, and the format providers (property files,
//! ASCII rasters, SLD styles) that back lazily opened resources.

pub mod builder;
pub mod config;
pub mod error;
pub mod formats;
pub mod models;
pub mod ports;
pub mod referencing;

pub use error::{GeocatError, Result};
