//! Test resources embedded in the crate
//!
//! Property files, SLD documents and rasters are compiled in with
//! `include_bytes!` and looked up by file name, the way a classpath loader
//! resolves resources relative to the fixture.

use std::collections::HashMap;

/// Source of named fixture resources
pub trait ResourceSource: Send + Sync {
    /// Bytes of the named resource, `None` when absent
    fn open(&self, name: &str) -> Option<&[u8]>;

    fn contains(&self, name: &str) -> bool {
        self.open(name).is_some()
    }
}

macro_rules! embed {
    ($($name:literal),* $(,)?) => {
        &[$(($name, include_bytes!(concat!("../data/", $name)) as &[u8])),*]
    };
}

static EMBEDDED: &[(&str, &[u8])] = embed![
    "AggregateGeoFeature.properties",
    "BasicPolygons.properties",
    "BasicPolygons.sld",
    "Bridges.properties",
    "Bridges.sld",
    "Buildings.properties",
    "Buildings.sld",
    "Default.sld",
    "Deletes.properties",
    "DividedRoutes.properties",
    "DividedRoutes.sld",
    "Fifteen.properties",
    "Forests.properties",
    "Forests.sld",
    "GenericEntity.properties",
    "Inserts.properties",
    "Lakes.properties",
    "Lakes.sld",
    "Lines.properties",
    "Locks.properties",
    "MLines.properties",
    "MPoints.properties",
    "MPolygons.properties",
    "MapNeatline.properties",
    "MapNeatline.sld",
    "NamedPlaces.properties",
    "NamedPlaces.sld",
    "Nulls.properties",
    "Other.properties",
    "Points.properties",
    "Polygons.properties",
    "Ponds.properties",
    "Ponds.sld",
    "PrimitiveGeoFeature.properties",
    "RoadSegments.properties",
    "RoadSegments.sld",
    "Seven.properties",
    "Streams.properties",
    "Streams.sld",
    "Updates.properties",
    "raster.sld",
    "tazbm.asc",
    "tazdem.asc",
    "world.grass",
];

/// Resources compiled into this crate
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedResources;

impl EmbeddedResources {
    /// Names of every embedded resource
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        EMBEDDED.iter().map(|(name, _)| *name)
    }
}

impl ResourceSource for EmbeddedResources {
    fn open(&self, name: &str) -> Option<&[u8]> {
        EMBEDDED.iter().find(|(n, _)| *n == name).map(|(_, bytes)| *bytes)
    }
}

/// In-memory resources, for fixtures assembled at runtime
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> &mut Self {
        self.entries.insert(name.into(), bytes.into());
        self
    }
}

impl ResourceSource for MemoryResources {
    fn open(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }
}
