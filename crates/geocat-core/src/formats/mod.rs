//! Format providers backing lazily opened catalog resources
//!
//! Vector data comes from property files through the `FeatureDataAccess` trait.
//! Raster data goes through the `GridFormat` trait; the `FormatRegistry` probes
//! a file against every registered format to find one that can read it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{GeocatError, Result};
use crate::models::{AffineTransform, Crs, GridRange, ReferencedEnvelope};

pub mod arcgrid;
pub mod ascii_grid;
pub mod grass;
pub mod property;
pub mod sld;

pub use arcgrid::ArcGridFormat;
pub use ascii_grid::{AsciiGrid, AsciiGridReader};
pub use grass::GrassFormat;
pub use property::{
    AttributeBinding, AttributeDescriptor, Feature, FeatureSchema, FeatureSource,
    PropertyDataStore,
};

/// Access to a collection of feature types, addressed by local name
pub trait FeatureDataAccess: Send + Sync + fmt::Debug {
    /// Local names of every feature type available
    fn type_names(&self) -> Result<Vec<String>>;

    /// Schema of the named feature type
    fn schema(&self, name: &str) -> Result<FeatureSchema>;

    /// Source over the features of the named feature type
    fn feature_source(&self, name: &str) -> Result<FeatureSource>;
}

/// A raster format able to recognize and open files
pub trait GridFormat: Send + Sync + fmt::Debug {
    /// Format name (e.g., "ArcGrid")
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Check whether this format can read the file, without a full read
    fn accepts(&self, path: &Path) -> bool;

    /// Open a reader over the file
    fn reader(&self, path: &Path) -> Result<Arc<dyn GridCoverageReader>>;
}

/// Decoded raster samples of a single band, row-major from the top row
#[derive(Debug, Clone, PartialEq)]
pub struct GridCoverage {
    pub width: usize,
    pub height: usize,
    /// `None` marks a no-data sample
    pub samples: Vec<Option<f64>>,
}

impl GridCoverage {
    /// Minimum and maximum of the valid samples
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.samples.iter().flatten().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
    }
}

/// Reader over one raster file
pub trait GridCoverageReader: Send + Sync + fmt::Debug {
    /// Name of the format that opened the file
    fn format_name(&self) -> &str;

    /// Native CRS of the raster
    fn crs(&self) -> &Crs;

    /// Native extent of the raster
    fn original_envelope(&self) -> ReferencedEnvelope;

    /// Full grid extent of the raster
    fn original_grid_range(&self) -> GridRange;

    /// Pixel-corner grid-to-world transform
    fn grid_to_world(&self) -> AffineTransform;

    /// Sample value standing for missing data, if declared
    fn no_data(&self) -> Option<f64>;

    /// Number of bands
    fn band_count(&self) -> usize {
        1
    }

    /// Decode the samples
    fn read(&self) -> Result<GridCoverage>;
}

/// Registry of grid formats used to probe raster files
///
/// Formats are asked in registration order; the first one accepting a file wins.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    formats: Vec<Arc<dyn GridFormat>>,
}

impl FormatRegistry {
    /// Create a new empty format registry
    pub fn new() -> Self {
        Self { formats: Vec::new() }
    }

    /// Registry with every built-in format
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ArcGridFormat));
        registry.register(Arc::new(GrassFormat));
        registry
    }

    /// Register a grid format
    pub fn register(&mut self, format: Arc<dyn GridFormat>) {
        self.formats.push(format);
    }

    /// Find the format able to read a file
    pub fn find_format(&self, path: &Path) -> Result<Arc<dyn GridFormat>> {
        self.formats
            .iter()
            .find(|format| format.accepts(path))
            .cloned()
            .ok_or_else(|| GeocatError::NoFormat { path: path.to_path_buf() })
    }

    /// Look up a registered format by name
    pub fn format_by_name(&self, name: &str) -> Option<Arc<dyn GridFormat>> {
        self.formats.iter().find(|format| format.name().eq_ignore_ascii_case(name)).cloned()
    }

    /// Names of all registered formats
    pub fn format_names(&self) -> Vec<String> {
        self.formats.iter().map(|format| format.name().to_string()).collect()
    }

    /// Get all registered formats
    pub fn formats(&self) -> &[Arc<dyn GridFormat>] {
        &self.formats
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
