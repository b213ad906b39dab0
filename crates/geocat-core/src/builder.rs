//! Catalog builder helper
//!
//! Computes the metadata a production catalog derives for a raster when it is
//! first configured: envelopes, grid geometry, band dimensions and the
//! advertised interpolation methods and SRS lists.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::formats::GridCoverageReader;
use crate::models::{
    CoverageDimension, Crs, GridGeometry, Interpolation, ProjectionPolicy, ReferencedEnvelope,
};
use crate::referencing;

/// Name given to the single band of a grayscale raster
pub const GRAY_INDEX: &str = "GRAY_INDEX";

/// Coverage metadata derived from a reader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageMetadata {
    pub native_format: String,
    pub srs: String,
    pub native_crs: Crs,
    pub projection_policy: ProjectionPolicy,
    pub native_bounding_box: ReferencedEnvelope,
    pub lat_lon_bounding_box: ReferencedEnvelope,
    pub grid: GridGeometry,
    pub dimensions: Vec<CoverageDimension>,
    pub default_interpolation_method: Interpolation,
    pub interpolation_methods: Vec<Interpolation>,
    pub request_srs: Vec<String>,
    pub response_srs: Vec<String>,
}

/// Builds resource metadata the way a production catalog configures it
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder;

impl CatalogBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Compute coverage metadata for the raster behind `reader`
    ///
    /// `store` is only used for logging.
    pub fn build_coverage(
        &self,
        store: &str,
        reader: &dyn GridCoverageReader,
    ) -> Result<CoverageMetadata> {
        let native_crs = reader.crs().clone();
        let native_bounding_box = reader.original_envelope();
        let lat_lon_bounding_box = referencing::to_lat_lon(&native_bounding_box)?;

        let grid = GridGeometry {
            range: reader.original_grid_range(),
            grid_to_world: reader.grid_to_world(),
            crs: native_crs.clone(),
        };

        let coverage = reader.read()?;
        let null_values: Vec<f64> = reader.no_data().into_iter().collect();
        let dimensions = (0..reader.band_count())
            .map(|band| CoverageDimension {
                name: if band == 0 { GRAY_INDEX.to_string() } else { format!("{}_{}", GRAY_INDEX, band) },
                description: format!("{} band {}", reader.format_name(), band),
                range: coverage.value_range(),
                null_values: null_values.clone(),
                unit: None,
            })
            .collect();

        let srs = native_crs.srs();
        tracing::debug!(
            "Built coverage metadata for store {} ({}, {}x{} cells, {})",
            store,
            reader.format_name(),
            grid.range.width(),
            grid.range.height(),
            srs
        );

        Ok(CoverageMetadata {
            native_format: reader.format_name().to_string(),
            srs: srs.clone(),
            native_crs,
            projection_policy: ProjectionPolicy::ForceDeclared,
            native_bounding_box,
            lat_lon_bounding_box,
            grid,
            dimensions,
            default_interpolation_method: Interpolation::Nearest,
            interpolation_methods: Interpolation::all(),
            request_srs: vec![srs.clone()],
            response_srs: vec![srs],
        })
    }
}
