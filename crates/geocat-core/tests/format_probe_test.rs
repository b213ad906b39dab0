//! Integration tests for grid format probing and coverage metadata
//!
//! This test suite verifies that:
//! - The default registry picks the format matching each raster header
//! - Files no format accepts fail with a "no format" error
//! - Coverage metadata built from either format is consistent with the reader

use geocat_core::builder::{CatalogBuilder, GRAY_INDEX};
use geocat_core::formats::FormatRegistry;
use geocat_core::models::ProjectionPolicy;
use geocat_core::GeocatError;
use std::fs;
use tempfile::TempDir;

const ARCGRID: &str = "ncols 4\nnrows 2\nxllcorner 145.0\nyllcorner -43.0\ncellsize 0.5\nNODATA_value -9999\n1 2 3 4\n5 6 -9999 8\n";

const GRASS: &str = "north: 90\nsouth: -90\neast: 180\nwest: -180\nrows: 2\ncols: 3\n1 2 3\n* 5 6\n";

#[test]
fn test_probe_picks_matching_format() {
    let dir = TempDir::new().unwrap();
    let asc = dir.path().join("dem.asc");
    let grass = dir.path().join("world.grass");
    fs::write(&asc, ARCGRID).unwrap();
    fs::write(&grass, GRASS).unwrap();

    let registry = FormatRegistry::with_defaults();
    assert_eq!(registry.find_format(&asc).unwrap().name(), "ArcGrid");
    assert_eq!(registry.find_format(&grass).unwrap().name(), "GRASS");
}

#[test]
fn test_probe_rejects_unknown_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "just some text\n").unwrap();

    let err = FormatRegistry::with_defaults().find_format(&path).unwrap_err();
    assert!(matches!(err, GeocatError::NoFormat { .. }));
}

#[test]
fn test_probe_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = FormatRegistry::with_defaults().find_format(&dir.path().join("missing.asc"));
    assert!(result.is_err(), "A missing file has no format");
}

#[test]
fn test_empty_registry_finds_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dem.asc");
    fs::write(&path, ARCGRID).unwrap();

    assert!(FormatRegistry::new().find_format(&path).is_err());
}

#[test]
fn test_coverage_metadata_from_grass() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("world.grass");
    fs::write(&path, GRASS).unwrap();

    let format = FormatRegistry::with_defaults().find_format(&path).unwrap();
    let reader = format.reader(&path).unwrap();
    let metadata = CatalogBuilder::new().build_coverage("World", reader.as_ref()).unwrap();

    assert_eq!(metadata.native_format, "GRASS");
    assert_eq!(metadata.projection_policy, ProjectionPolicy::ForceDeclared);
    assert_eq!(metadata.lat_lon_bounding_box.min_x, -180.0);
    assert_eq!(metadata.lat_lon_bounding_box.max_y, 90.0);
    assert_eq!(metadata.grid.range.width(), 3);
    assert_eq!(metadata.grid.range.height(), 2);
    assert_eq!(metadata.dimensions[0].name, GRAY_INDEX);
    assert_eq!(metadata.dimensions[0].range, Some((1.0, 6.0)));
    assert!(metadata.dimensions[0].null_values.is_empty());
}

#[test]
fn test_coverage_metadata_grid_matches_envelope() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dem.asc");
    fs::write(&path, ARCGRID).unwrap();

    let reader = FormatRegistry::with_defaults().find_format(&path).unwrap().reader(&path).unwrap();
    let metadata = CatalogBuilder::new().build_coverage("DEM", reader.as_ref()).unwrap();

    let envelope = &metadata.native_bounding_box;
    let (max_x, min_y) = metadata.grid.grid_to_world.apply(
        metadata.grid.range.width() as f64,
        metadata.grid.range.height() as f64,
    );
    assert_eq!((envelope.min_x, envelope.max_y), metadata.grid.grid_to_world.apply(0.0, 0.0));
    assert_eq!((envelope.max_x, envelope.min_y), (max_x, min_y));
    assert_eq!(metadata.dimensions[0].null_values, vec![-9999.0]);
}
