//! Feature types and coverages.

use std::sync::Arc;

use super::{
    CoverageDimension, CoverageStoreInfo, Crs, DataStoreInfo, GridGeometry, Interpolation,
    Keyword, Lazy, MetadataMap, NamespaceInfo, ProjectionPolicy, QualifiedName,
    ReferencedEnvelope, StoreInfo,
};
use crate::error::Result;
use crate::formats::{FeatureSchema, FeatureSource, GridCoverageReader};

/// Resource kinds accepted by resource queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Any resource
    Any,
    /// Vector feature types
    FeatureType,
    /// Raster coverages
    Coverage,
}

/// Attributes shared by every resource
#[derive(Debug, Clone)]
pub struct ResourceHeader {
    pub id: String,
    pub name: String,
    pub native_name: String,
    pub namespace: Arc<NamespaceInfo>,
    pub title: String,
    pub abstract_: String,
    pub description: Option<String>,
    pub keywords: Vec<Keyword>,
    /// Declared SRS in `EPSG:<code>` form
    pub srs: String,
    pub native_crs: Crs,
    pub native_bounding_box: Option<ReferencedEnvelope>,
    pub lat_lon_bounding_box: ReferencedEnvelope,
    pub projection_policy: ProjectionPolicy,
    pub enabled: bool,
    pub advertised: bool,
    pub metadata: MetadataMap,
}

impl ResourceHeader {
    /// Name qualified with the namespace URI
    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName::new(self.namespace.uri.clone(), self.name.clone())
    }

    /// Native name qualified with the namespace URI
    pub fn qualified_native_name(&self) -> QualifiedName {
        QualifiedName::new(self.namespace.uri.clone(), self.native_name.clone())
    }

    /// Name in `prefix:local` form
    pub fn prefixed_name(&self) -> String {
        format!("{}:{}", self.namespace.prefix, self.name)
    }
}

/// Vector dataset hosted by a data store
#[derive(Debug)]
pub struct FeatureTypeInfo {
    pub header: ResourceHeader,
    pub store: Arc<DataStoreInfo>,
    pub num_decimals: u32,
    pub feature_type: Lazy<Arc<FeatureSchema>>,
    pub feature_source: Lazy<Arc<FeatureSource>>,
}

impl FeatureTypeInfo {
    /// Schema of the features, opened on demand
    pub fn feature_type(&self) -> Result<Arc<FeatureSchema>> {
        self.feature_type.get()
    }

    /// Source of the features, opened on demand
    pub fn feature_source(&self) -> Result<Arc<FeatureSource>> {
        self.feature_source.get()
    }
}

/// Raster dataset hosted by a coverage store
#[derive(Debug)]
pub struct CoverageInfo {
    pub header: ResourceHeader,
    pub store: Arc<CoverageStoreInfo>,
    pub default_interpolation_method: Interpolation,
    pub interpolation_methods: Vec<Interpolation>,
    pub dimensions: Vec<CoverageDimension>,
    pub grid: GridGeometry,
    pub request_srs: Vec<String>,
    pub response_srs: Vec<String>,
    pub reader: Lazy<Arc<dyn GridCoverageReader>>,
}

impl CoverageInfo {
    /// Reader over the raster, opened on demand
    pub fn grid_coverage_reader(&self) -> Result<Arc<dyn GridCoverageReader>> {
        self.reader.get()
    }
}

/// Either kind of resource
#[derive(Debug, Clone)]
pub enum ResourceInfo {
    FeatureType(Arc<FeatureTypeInfo>),
    Coverage(Arc<CoverageInfo>),
}

impl ResourceInfo {
    pub fn header(&self) -> &ResourceHeader {
        match self {
            ResourceInfo::FeatureType(ft) => &ft.header,
            ResourceInfo::Coverage(c) => &c.header,
        }
    }

    pub fn id(&self) -> &str {
        &self.header().id
    }

    pub fn name(&self) -> &str {
        &self.header().name
    }

    pub fn namespace(&self) -> &Arc<NamespaceInfo> {
        &self.header().namespace
    }

    pub fn store(&self) -> StoreInfo {
        match self {
            ResourceInfo::FeatureType(ft) => StoreInfo::Data(Arc::clone(&ft.store)),
            ResourceInfo::Coverage(c) => StoreInfo::Coverage(Arc::clone(&c.store)),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceInfo::FeatureType(_) => ResourceKind::FeatureType,
            ResourceInfo::Coverage(_) => ResourceKind::Coverage,
        }
    }

    /// Whether a query for `kind` may return this resource
    pub fn is_kind(&self, kind: ResourceKind) -> bool {
        kind == ResourceKind::Any || kind == self.kind()
    }

    pub fn as_feature_type(&self) -> Option<&Arc<FeatureTypeInfo>> {
        match self {
            ResourceInfo::FeatureType(ft) => Some(ft),
            ResourceInfo::Coverage(_) => None,
        }
    }

    pub fn as_coverage(&self) -> Option<&Arc<CoverageInfo>> {
        match self {
            ResourceInfo::Coverage(c) => Some(c),
            ResourceInfo::FeatureType(_) => None,
        }
    }
}

impl PartialEq for ResourceInfo {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.id() == other.id()
    }
}
