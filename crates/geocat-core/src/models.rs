pub mod coverage;
pub mod geometry;
pub mod layer;
pub mod lazy;
pub mod name;
pub mod resource;
pub mod store;
pub mod style;
pub mod workspace;

pub use coverage::{AffineTransform, CoverageDimension, GridGeometry, GridRange, Interpolation};
pub use geometry::{Crs, ProjectionPolicy, ReferencedEnvelope};
pub use layer::{LayerInfo, LayerType};
pub use lazy::Lazy;
pub use name::{Keyword, MetadataMap, QualifiedName};
pub use resource::{CoverageInfo, FeatureTypeInfo, ResourceHeader, ResourceInfo, ResourceKind};
pub use store::{
    file_url, ConnectionParameters, CoverageStoreInfo, DataStoreInfo, StoreInfo, StoreKind,
};
pub use style::{StyleInfo, SLD_10};
pub use workspace::{NamespaceInfo, WorkspaceInfo};

use std::sync::Arc;

/// Any catalog entity, used by the mutation operations of the catalog port
#[derive(Debug, Clone)]
pub enum CatalogInfo {
    Workspace(Arc<WorkspaceInfo>),
    Namespace(Arc<NamespaceInfo>),
    Store(StoreInfo),
    Resource(ResourceInfo),
    Layer(Arc<LayerInfo>),
    Style(Arc<StyleInfo>),
}

impl CatalogInfo {
    /// Identifier of the wrapped entity
    pub fn id(&self) -> &str {
        match self {
            CatalogInfo::Workspace(ws) => &ws.id,
            CatalogInfo::Namespace(ns) => &ns.id,
            CatalogInfo::Store(store) => store.id(),
            CatalogInfo::Resource(resource) => resource.id(),
            CatalogInfo::Layer(layer) => &layer.id,
            CatalogInfo::Style(style) => &style.id,
        }
    }

    /// Human-readable entity kind (e.g., "workspace", "layer")
    pub fn kind_name(&self) -> &'static str {
        match self {
            CatalogInfo::Workspace(_) => "workspace",
            CatalogInfo::Namespace(_) => "namespace",
            CatalogInfo::Store(StoreInfo::Data(_)) => "data store",
            CatalogInfo::Store(StoreInfo::Coverage(_)) => "coverage store",
            CatalogInfo::Resource(ResourceInfo::FeatureType(_)) => "feature type",
            CatalogInfo::Resource(ResourceInfo::Coverage(_)) => "coverage",
            CatalogInfo::Layer(_) => "layer",
            CatalogInfo::Style(_) => "style",
        }
    }
}
