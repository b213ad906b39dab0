//! Read-only catalog replaying programmed answers

use std::path::PathBuf;
use std::sync::Arc;

use geocat_core::models::{
    CatalogInfo, LayerInfo, NamespaceInfo, QualifiedName, ResourceInfo, ResourceKind, StoreInfo,
    StoreKind, StyleInfo, WorkspaceInfo,
};
use geocat_core::ports::Catalog;
use geocat_core::{GeocatError, Result};

use crate::answers::Answers;

/// Catalog whose every lookup is answered from a finalized answer table
#[derive(Debug)]
pub struct MockCatalog {
    answers: Answers,
    data_directory: PathBuf,
}

impl MockCatalog {
    pub(crate) fn new(answers: Answers, data_directory: PathBuf) -> Self {
        Self { answers, data_directory }
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    fn read_only(operation: &str, info: &CatalogInfo) -> Result<()> {
        tracing::warn!("Rejected {} of {} {} on read-only catalog", operation, info.kind_name(), info.id());
        Err(GeocatError::ReadOnlyCatalog { operation: operation.to_string() })
    }
}

impl Catalog for MockCatalog {
    fn get_workspace(&self, id: &str) -> Option<Arc<WorkspaceInfo>> {
        self.answers.workspace_by_id.answer(id)
    }

    fn get_workspace_by_name(&self, name: &str) -> Option<Arc<WorkspaceInfo>> {
        self.answers.workspace_by_name.answer(name)
    }

    fn get_workspaces(&self) -> Vec<Arc<WorkspaceInfo>> {
        self.answers.workspaces.clone()
    }

    fn get_default_workspace(&self) -> Option<Arc<WorkspaceInfo>> {
        self.answers.default_workspace.clone()
    }

    fn get_namespace(&self, id: &str) -> Option<Arc<NamespaceInfo>> {
        self.answers.namespace_by_id.answer(id)
    }

    fn get_namespace_by_prefix(&self, prefix: &str) -> Option<Arc<NamespaceInfo>> {
        self.answers.namespace_by_prefix.answer(prefix)
    }

    fn get_namespace_by_uri(&self, uri: &str) -> Option<Arc<NamespaceInfo>> {
        self.answers.namespace_by_uri.answer(uri)
    }

    fn get_namespaces(&self) -> Vec<Arc<NamespaceInfo>> {
        self.answers.namespaces.clone()
    }

    fn get_default_namespace(&self) -> Option<Arc<NamespaceInfo>> {
        self.answers.default_namespace.clone()
    }

    fn get_store(&self, id: &str, kind: StoreKind) -> Option<StoreInfo> {
        self.answers.store_by_id.answer(&(kind, id.to_string()))
    }

    fn get_store_by_name(
        &self,
        workspace: Option<&str>,
        name: &str,
        kind: StoreKind,
    ) -> Option<StoreInfo> {
        self.answers
            .store_by_name
            .answer(&(kind, workspace.map(str::to_string), name.to_string()))
    }

    fn get_stores_by_workspace(&self, workspace: &str, kind: StoreKind) -> Vec<StoreInfo> {
        self.answers.stores_by_workspace.answer_list(&(kind, workspace.to_string()))
    }

    fn get_stores(&self, kind: StoreKind) -> Vec<StoreInfo> {
        self.answers.stores.answer_list(&kind)
    }

    fn get_resource(&self, id: &str, kind: ResourceKind) -> Option<ResourceInfo> {
        self.answers.resource_by_id.answer(&(kind, id.to_string()))
    }

    fn get_resource_by_name(&self, name: &str, kind: ResourceKind) -> Option<ResourceInfo> {
        self.answers.resource_by_name.answer(&(kind, name.to_string()))
    }

    fn get_resource_by_qualified_name(
        &self,
        name: &QualifiedName,
        kind: ResourceKind,
    ) -> Option<ResourceInfo> {
        self.answers.resource_by_qualified(name, kind)
    }

    fn get_resource_by_store(
        &self,
        store: &StoreInfo,
        name: &str,
        kind: ResourceKind,
    ) -> Option<ResourceInfo> {
        self.answers
            .resource_by_store
            .answer(&(kind, store.id().to_string(), name.to_string()))
    }

    fn get_resources_by_store(&self, store: &StoreInfo, kind: ResourceKind) -> Vec<ResourceInfo> {
        self.answers.resources_by_store.answer_list(&(kind, store.id().to_string()))
    }

    fn get_resources_by_namespace(
        &self,
        namespace: &NamespaceInfo,
        kind: ResourceKind,
    ) -> Vec<ResourceInfo> {
        self.answers.resources_by_namespace.answer_list(&(kind, namespace.id.clone()))
    }

    fn get_resources(&self, kind: ResourceKind) -> Vec<ResourceInfo> {
        self.answers.resources.answer_list(&kind)
    }

    fn get_layer(&self, id: &str) -> Option<Arc<LayerInfo>> {
        self.answers.layer_by_id.answer(id)
    }

    fn get_layer_by_name(&self, name: &str) -> Option<Arc<LayerInfo>> {
        self.answers.layer_by_name.answer(name)
    }

    fn get_layer_by_qualified_name(&self, name: &QualifiedName) -> Option<Arc<LayerInfo>> {
        self.answers.layer_by_qualified(name)
    }

    fn get_layers(&self) -> Vec<Arc<LayerInfo>> {
        self.answers.layers.clone()
    }

    fn get_style(&self, id: &str) -> Option<Arc<StyleInfo>> {
        self.answers.style_by_id.answer(id)
    }

    fn get_style_by_name(&self, name: &str) -> Option<Arc<StyleInfo>> {
        self.answers.style_by_name.answer(name)
    }

    fn get_styles(&self) -> Vec<Arc<StyleInfo>> {
        self.answers.styles.clone()
    }

    fn data_directory(&self) -> Option<PathBuf> {
        Some(self.data_directory.clone())
    }

    fn add(&self, info: CatalogInfo) -> Result<()> {
        Self::read_only("add", &info)
    }

    fn save(&self, info: CatalogInfo) -> Result<()> {
        Self::read_only("save", &info)
    }

    fn remove(&self, info: CatalogInfo) -> Result<()> {
        Self::read_only("remove", &info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geocat_core::models::MetadataMap;

    fn empty() -> MockCatalog {
        MockCatalog::new(Answers::new(), PathBuf::from("/tmp/mockdata"))
    }

    #[test]
    fn test_empty_catalog_answers_benign_defaults() {
        let catalog = empty();
        assert!(catalog.get_workspace_by_name("cite").is_none());
        assert!(catalog.get_default_workspace().is_none());
        assert!(catalog.get_stores(StoreKind::Any).is_empty());
        assert!(catalog.get_feature_type_by_name("Buildings").is_none());
        assert!(catalog.get_coverages().is_empty());
        assert!(catalog.get_layer_by_qualified_name(&QualifiedName::local("Lakes")).is_none());
        assert_eq!(catalog.data_directory(), Some(PathBuf::from("/tmp/mockdata")));
    }

    #[test]
    fn test_mutations_are_rejected() {
        let catalog = empty();
        let ws = Arc::new(WorkspaceInfo { id: "w".into(), name: "extra".into(), metadata: MetadataMap::new() });

        for result in [
            catalog.add(CatalogInfo::Workspace(Arc::clone(&ws))),
            catalog.save(CatalogInfo::Workspace(Arc::clone(&ws))),
            catalog.remove(CatalogInfo::Workspace(ws)),
        ] {
            assert!(matches!(result, Err(GeocatError::ReadOnlyCatalog { .. })));
        }
    }
}
