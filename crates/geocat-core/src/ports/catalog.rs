use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{
    CatalogInfo, CoverageInfo, CoverageStoreInfo, DataStoreInfo, FeatureTypeInfo, LayerInfo,
    NamespaceInfo, QualifiedName, ResourceInfo, ResourceKind, StoreInfo, StoreKind, StyleInfo,
    WorkspaceInfo,
};

/// Port for catalog lookups
///
/// Lookups return `None` (or an empty list) when nothing matches. Name lookups
/// accept both a local name and a `prefix:local` composite; qualified names
/// match on either the namespace prefix or its URI.
pub trait Catalog: Send + Sync {
    // Workspaces

    fn get_workspace(&self, id: &str) -> Option<Arc<WorkspaceInfo>>;

    fn get_workspace_by_name(&self, name: &str) -> Option<Arc<WorkspaceInfo>>;

    fn get_workspaces(&self) -> Vec<Arc<WorkspaceInfo>>;

    fn get_default_workspace(&self) -> Option<Arc<WorkspaceInfo>>;

    // Namespaces

    fn get_namespace(&self, id: &str) -> Option<Arc<NamespaceInfo>>;

    fn get_namespace_by_prefix(&self, prefix: &str) -> Option<Arc<NamespaceInfo>>;

    fn get_namespace_by_uri(&self, uri: &str) -> Option<Arc<NamespaceInfo>>;

    fn get_namespaces(&self) -> Vec<Arc<NamespaceInfo>>;

    fn get_default_namespace(&self) -> Option<Arc<NamespaceInfo>>;

    // Stores

    /// Store by id, restricted to `kind`
    fn get_store(&self, id: &str, kind: StoreKind) -> Option<StoreInfo>;

    /// Store by name, within a workspace when one is given
    fn get_store_by_name(&self, workspace: Option<&str>, name: &str, kind: StoreKind)
        -> Option<StoreInfo>;

    /// Stores of a workspace, in insertion order
    fn get_stores_by_workspace(&self, workspace: &str, kind: StoreKind) -> Vec<StoreInfo>;

    fn get_stores(&self, kind: StoreKind) -> Vec<StoreInfo>;

    // Resources

    fn get_resource(&self, id: &str, kind: ResourceKind) -> Option<ResourceInfo>;

    /// Resource by local name or `prefix:local`
    fn get_resource_by_name(&self, name: &str, kind: ResourceKind) -> Option<ResourceInfo>;

    fn get_resource_by_qualified_name(
        &self,
        name: &QualifiedName,
        kind: ResourceKind,
    ) -> Option<ResourceInfo>;

    fn get_resource_by_store(
        &self,
        store: &StoreInfo,
        name: &str,
        kind: ResourceKind,
    ) -> Option<ResourceInfo>;

    fn get_resources_by_store(&self, store: &StoreInfo, kind: ResourceKind) -> Vec<ResourceInfo>;

    fn get_resources_by_namespace(
        &self,
        namespace: &NamespaceInfo,
        kind: ResourceKind,
    ) -> Vec<ResourceInfo>;

    fn get_resources(&self, kind: ResourceKind) -> Vec<ResourceInfo>;

    // Layers

    fn get_layer(&self, id: &str) -> Option<Arc<LayerInfo>>;

    fn get_layer_by_name(&self, name: &str) -> Option<Arc<LayerInfo>>;

    fn get_layer_by_qualified_name(&self, name: &QualifiedName) -> Option<Arc<LayerInfo>>;

    fn get_layers(&self) -> Vec<Arc<LayerInfo>>;

    // Styles

    fn get_style(&self, id: &str) -> Option<Arc<StyleInfo>>;

    fn get_style_by_name(&self, name: &str) -> Option<Arc<StyleInfo>>;

    fn get_styles(&self) -> Vec<Arc<StyleInfo>>;

    /// Root directory holding the catalog data, if any
    fn data_directory(&self) -> Option<PathBuf>;

    // Mutations

    fn add(&self, info: CatalogInfo) -> Result<()>;

    fn save(&self, info: CatalogInfo) -> Result<()>;

    fn remove(&self, info: CatalogInfo) -> Result<()>;

    // Typed store helpers

    fn get_data_store(&self, id: &str) -> Option<Arc<DataStoreInfo>> {
        self.get_store(id, StoreKind::Data).and_then(|s| s.as_data_store().cloned())
    }

    fn get_data_store_by_name(&self, name: &str) -> Option<Arc<DataStoreInfo>> {
        self.get_store_by_name(None, name, StoreKind::Data)
            .and_then(|s| s.as_data_store().cloned())
    }

    fn get_data_store_by_workspace(
        &self,
        workspace: &WorkspaceInfo,
        name: &str,
    ) -> Option<Arc<DataStoreInfo>> {
        self.get_store_by_name(Some(&workspace.name), name, StoreKind::Data)
            .and_then(|s| s.as_data_store().cloned())
    }

    fn get_data_stores_by_workspace(&self, workspace: &WorkspaceInfo) -> Vec<Arc<DataStoreInfo>> {
        self.get_stores_by_workspace(&workspace.name, StoreKind::Data)
            .iter()
            .filter_map(|s| s.as_data_store().cloned())
            .collect()
    }

    fn get_data_stores(&self) -> Vec<Arc<DataStoreInfo>> {
        self.get_stores(StoreKind::Data).iter().filter_map(|s| s.as_data_store().cloned()).collect()
    }

    fn get_coverage_store(&self, id: &str) -> Option<Arc<CoverageStoreInfo>> {
        self.get_store(id, StoreKind::Coverage).and_then(|s| s.as_coverage_store().cloned())
    }

    fn get_coverage_store_by_name(&self, name: &str) -> Option<Arc<CoverageStoreInfo>> {
        self.get_store_by_name(None, name, StoreKind::Coverage)
            .and_then(|s| s.as_coverage_store().cloned())
    }

    fn get_coverage_store_by_workspace(
        &self,
        workspace: &WorkspaceInfo,
        name: &str,
    ) -> Option<Arc<CoverageStoreInfo>> {
        self.get_store_by_name(Some(&workspace.name), name, StoreKind::Coverage)
            .and_then(|s| s.as_coverage_store().cloned())
    }

    fn get_coverage_stores_by_workspace(
        &self,
        workspace: &WorkspaceInfo,
    ) -> Vec<Arc<CoverageStoreInfo>> {
        self.get_stores_by_workspace(&workspace.name, StoreKind::Coverage)
            .iter()
            .filter_map(|s| s.as_coverage_store().cloned())
            .collect()
    }

    fn get_coverage_stores(&self) -> Vec<Arc<CoverageStoreInfo>> {
        self.get_stores(StoreKind::Coverage)
            .iter()
            .filter_map(|s| s.as_coverage_store().cloned())
            .collect()
    }

    // Typed resource helpers

    /// Resource by namespace and local name
    fn get_resource_by_namespace(
        &self,
        namespace: &NamespaceInfo,
        name: &str,
        kind: ResourceKind,
    ) -> Option<ResourceInfo> {
        self.get_resource_by_qualified_name(&QualifiedName::new(namespace.uri.clone(), name), kind)
    }

    /// Resource by namespace prefix and local name
    fn get_resource_by_prefix(
        &self,
        prefix: &str,
        name: &str,
        kind: ResourceKind,
    ) -> Option<ResourceInfo> {
        self.get_resource_by_qualified_name(&QualifiedName::new(prefix, name), kind)
    }

    fn get_feature_type(&self, id: &str) -> Option<Arc<FeatureTypeInfo>> {
        feature_type(self.get_resource(id, ResourceKind::FeatureType))
    }

    fn get_feature_type_by_name(&self, name: &str) -> Option<Arc<FeatureTypeInfo>> {
        feature_type(self.get_resource_by_name(name, ResourceKind::FeatureType))
    }

    fn get_feature_type_by_qualified_name(&self, name: &QualifiedName) -> Option<Arc<FeatureTypeInfo>> {
        feature_type(self.get_resource_by_qualified_name(name, ResourceKind::FeatureType))
    }

    fn get_feature_type_by_namespace(
        &self,
        namespace: &NamespaceInfo,
        name: &str,
    ) -> Option<Arc<FeatureTypeInfo>> {
        feature_type(self.get_resource_by_namespace(namespace, name, ResourceKind::FeatureType))
    }

    fn get_feature_type_by_prefix(&self, prefix: &str, name: &str) -> Option<Arc<FeatureTypeInfo>> {
        feature_type(self.get_resource_by_prefix(prefix, name, ResourceKind::FeatureType))
    }

    fn get_feature_type_by_data_store(
        &self,
        store: &Arc<DataStoreInfo>,
        name: &str,
    ) -> Option<Arc<FeatureTypeInfo>> {
        let store = StoreInfo::Data(Arc::clone(store));
        feature_type(self.get_resource_by_store(&store, name, ResourceKind::FeatureType))
    }

    fn get_feature_types_by_data_store(&self, store: &Arc<DataStoreInfo>) -> Vec<Arc<FeatureTypeInfo>> {
        let store = StoreInfo::Data(Arc::clone(store));
        feature_types(self.get_resources_by_store(&store, ResourceKind::FeatureType))
    }

    fn get_feature_types_by_namespace(&self, namespace: &NamespaceInfo) -> Vec<Arc<FeatureTypeInfo>> {
        feature_types(self.get_resources_by_namespace(namespace, ResourceKind::FeatureType))
    }

    fn get_feature_types(&self) -> Vec<Arc<FeatureTypeInfo>> {
        feature_types(self.get_resources(ResourceKind::FeatureType))
    }

    fn get_coverage(&self, id: &str) -> Option<Arc<CoverageInfo>> {
        coverage(self.get_resource(id, ResourceKind::Coverage))
    }

    fn get_coverage_by_name(&self, name: &str) -> Option<Arc<CoverageInfo>> {
        coverage(self.get_resource_by_name(name, ResourceKind::Coverage))
    }

    fn get_coverage_by_qualified_name(&self, name: &QualifiedName) -> Option<Arc<CoverageInfo>> {
        coverage(self.get_resource_by_qualified_name(name, ResourceKind::Coverage))
    }

    fn get_coverage_by_namespace(
        &self,
        namespace: &NamespaceInfo,
        name: &str,
    ) -> Option<Arc<CoverageInfo>> {
        coverage(self.get_resource_by_namespace(namespace, name, ResourceKind::Coverage))
    }

    fn get_coverage_by_prefix(&self, prefix: &str, name: &str) -> Option<Arc<CoverageInfo>> {
        coverage(self.get_resource_by_prefix(prefix, name, ResourceKind::Coverage))
    }

    fn get_coverage_by_coverage_store(
        &self,
        store: &Arc<CoverageStoreInfo>,
        name: &str,
    ) -> Option<Arc<CoverageInfo>> {
        let store = StoreInfo::Coverage(Arc::clone(store));
        coverage(self.get_resource_by_store(&store, name, ResourceKind::Coverage))
    }

    fn get_coverages_by_coverage_store(&self, store: &Arc<CoverageStoreInfo>) -> Vec<Arc<CoverageInfo>> {
        let store = StoreInfo::Coverage(Arc::clone(store));
        coverages(self.get_resources_by_store(&store, ResourceKind::Coverage))
    }

    fn get_coverages_by_namespace(&self, namespace: &NamespaceInfo) -> Vec<Arc<CoverageInfo>> {
        coverages(self.get_resources_by_namespace(namespace, ResourceKind::Coverage))
    }

    fn get_coverages(&self) -> Vec<Arc<CoverageInfo>> {
        coverages(self.get_resources(ResourceKind::Coverage))
    }
}

fn feature_type(resource: Option<ResourceInfo>) -> Option<Arc<FeatureTypeInfo>> {
    resource.and_then(|r| r.as_feature_type().cloned())
}

fn feature_types(resources: Vec<ResourceInfo>) -> Vec<Arc<FeatureTypeInfo>> {
    resources.iter().filter_map(|r| r.as_feature_type().cloned()).collect()
}

fn coverage(resource: Option<ResourceInfo>) -> Option<Arc<CoverageInfo>> {
    resource.and_then(|r| r.as_coverage().cloned())
}

fn coverages(resources: Vec<ResourceInfo>) -> Vec<Arc<CoverageInfo>> {
    resources.iter().filter_map(|r| r.as_coverage().cloned()).collect()
}
