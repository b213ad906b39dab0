//! Workspaces, types and coverages of the CITE compliance data set

use std::collections::BTreeMap;

pub const DEFAULT_PREFIX: &str = "gs";
pub const DEFAULT_URI: &str = "http://geoserver.org";

pub const CITE_PREFIX: &str = "cite";
pub const CITE_URI: &str = "http://www.opengis.net/cite";

pub const CDF_PREFIX: &str = "cdf";
pub const CDF_URI: &str = "http://www.opengis.net/cite/data";

pub const CGF_PREFIX: &str = "cgf";
pub const CGF_URI: &str = "http://www.opengis.net/cite/geometry";

pub const SF_PREFIX: &str = "sf";
pub const SF_URI: &str = "http://cite.opengeospatial.org/gmlsf";

pub const WCS_PREFIX: &str = "wcs";
pub const WCS_URI: &str = "http://www.opengis.net/wcs/1.1.1";

pub const DEFAULT_VECTOR_STYLE: &str = "Default";
pub const DEFAULT_RASTER_STYLE: &str = "raster";

pub const CITE_TYPENAMES: &[&str] = &[
    "BasicPolygons",
    "Bridges",
    "Buildings",
    "DividedRoutes",
    "Forests",
    "Lakes",
    "MapNeatline",
    "NamedPlaces",
    "Ponds",
    "RoadSegments",
    "Streams",
];

pub const CDF_TYPENAMES: &[&str] =
    &["Deletes", "Fifteen", "Inserts", "Locks", "Nulls", "Other", "Seven", "Updates"];

pub const CGF_TYPENAMES: &[&str] = &["Lines", "MLines", "MPoints", "MPolygons", "Points", "Polygons"];

pub const SF_TYPENAMES: &[&str] = &["PrimitiveGeoFeature", "AggregateGeoFeature", "GenericEntity"];

/// CITE types declared in UTM zone 15N
const CITE_UTM_TYPENAMES: &[&str] = &["DividedRoutes", "Lakes", "NamedPlaces", "RoadSegments", "Streams"];

const UTM_15N: u32 = 32615;

/// A raster published as its own coverage store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageDescriptor {
    pub name: &'static str,
    pub filename: &'static str,
    pub format: &'static str,
}

pub const COVERAGES: &[CoverageDescriptor] = &[
    CoverageDescriptor { name: "BlueMarble", filename: "tazbm.asc", format: "ArcGrid" },
    CoverageDescriptor { name: "DEM", filename: "tazdem.asc", format: "ArcGrid" },
    CoverageDescriptor { name: "World", filename: "world.grass", format: "GRASS" },
];

/// A workspace with the vector types and rasters it publishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkspaceDescriptor {
    pub prefix: &'static str,
    pub uri: &'static str,
    pub type_names: &'static [&'static str],
    pub coverages: &'static [CoverageDescriptor],
}

impl WorkspaceDescriptor {
    const fn vector(prefix: &'static str, uri: &'static str, type_names: &'static [&'static str]) -> Self {
        Self { prefix, uri, type_names, coverages: &[] }
    }
}

/// Vector workspaces, in the order they are created; the first is the default
pub const VECTOR_WORKSPACES: &[WorkspaceDescriptor] = &[
    WorkspaceDescriptor::vector(DEFAULT_PREFIX, DEFAULT_URI, &[]),
    WorkspaceDescriptor::vector(CGF_PREFIX, CGF_URI, CGF_TYPENAMES),
    WorkspaceDescriptor::vector(CDF_PREFIX, CDF_URI, CDF_TYPENAMES),
    WorkspaceDescriptor::vector(SF_PREFIX, SF_URI, SF_TYPENAMES),
    WorkspaceDescriptor::vector(CITE_PREFIX, CITE_URI, CITE_TYPENAMES),
];

pub const RASTER_WORKSPACE: WorkspaceDescriptor =
    WorkspaceDescriptor { prefix: WCS_PREFIX, uri: WCS_URI, type_names: &[], coverages: COVERAGES };

/// EPSG codes of the CITE types not declared in WGS 84
pub fn srs_codes() -> BTreeMap<String, u32> {
    CITE_UTM_TYPENAMES.iter().map(|name| (name.to_string(), UTM_15N)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{EmbeddedResources, ResourceSource};

    #[test]
    fn test_every_type_has_a_property_file() {
        for workspace in VECTOR_WORKSPACES {
            for name in workspace.type_names {
                assert!(EmbeddedResources.contains(&format!("{}.properties", name)), "{}", name);
            }
        }
    }

    #[test]
    fn test_every_coverage_is_embedded() {
        for coverage in RASTER_WORKSPACE.coverages {
            assert!(EmbeddedResources.contains(coverage.filename));
        }
    }

    #[test]
    fn test_srs_codes() {
        let codes = srs_codes();
        assert_eq!(codes.get("Lakes"), Some(&32615));
        assert_eq!(codes.get("Buildings"), None);
        assert_eq!(codes.len(), 5);
    }
}
