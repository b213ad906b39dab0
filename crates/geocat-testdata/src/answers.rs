//! Answer programmer
//!
//! Every lookup shape of the catalog is backed by an `AnswerTable`. Programming
//! an entity installs it under each key production code may ask with; a key
//! programmed twice keeps its first answer.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use geocat_core::models::{
    CoverageStoreInfo, DataStoreInfo, LayerInfo, NamespaceInfo, QualifiedName, ResourceInfo,
    ResourceKind, StoreInfo, StoreKind, StyleInfo, WorkspaceInfo,
};

/// Answers keyed by query arguments
#[derive(Debug, Clone)]
pub struct AnswerTable<K, V> {
    answers: HashMap<K, V>,
}

impl<K, V> Default for AnswerTable<K, V> {
    fn default() -> Self {
        Self { answers: HashMap::new() }
    }
}

impl<K: Eq + Hash, V: Clone> AnswerTable<K, V> {
    /// Install an answer; returns false when the key already has one
    pub fn program(&mut self, key: K, value: V) -> bool {
        match self.answers.entry(key) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
        }
    }

    pub fn answer<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.answers.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl<K: Eq + Hash, V: Clone> AnswerTable<K, Vec<V>> {
    /// Answer of a list query; unprogrammed keys yield an empty list
    pub fn answer_list<Q>(&self, key: &Q) -> Vec<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.answer(key).unwrap_or_default()
    }
}

/// Store kinds a store answers for
fn store_kinds(store: &StoreInfo) -> [StoreKind; 2] {
    [store.kind(), StoreKind::Any]
}

/// Resource kinds a resource answers for
fn resource_kinds(resource: &ResourceInfo) -> [ResourceKind; 2] {
    [resource.kind(), ResourceKind::Any]
}

/// Everything published by the catalog-wide enumerations, in insertion order
#[derive(Debug, Default)]
pub struct CatalogContents {
    pub workspaces: Vec<Arc<WorkspaceInfo>>,
    pub namespaces: Vec<Arc<NamespaceInfo>>,
    pub data_stores: Vec<Arc<DataStoreInfo>>,
    pub coverage_stores: Vec<Arc<CoverageStoreInfo>>,
    pub feature_types: Vec<ResourceInfo>,
    pub coverages: Vec<ResourceInfo>,
    pub layers: Vec<Arc<LayerInfo>>,
    pub styles: Vec<Arc<StyleInfo>>,
}

/// Every answer the mock catalog replays
#[derive(Debug, Default)]
pub struct Answers {
    pub workspace_by_id: AnswerTable<String, Arc<WorkspaceInfo>>,
    pub workspace_by_name: AnswerTable<String, Arc<WorkspaceInfo>>,
    pub workspaces: Vec<Arc<WorkspaceInfo>>,
    pub default_workspace: Option<Arc<WorkspaceInfo>>,

    pub namespace_by_id: AnswerTable<String, Arc<NamespaceInfo>>,
    pub namespace_by_prefix: AnswerTable<String, Arc<NamespaceInfo>>,
    pub namespace_by_uri: AnswerTable<String, Arc<NamespaceInfo>>,
    pub namespaces: Vec<Arc<NamespaceInfo>>,
    pub default_namespace: Option<Arc<NamespaceInfo>>,

    pub store_by_id: AnswerTable<(StoreKind, String), StoreInfo>,
    /// Keyed by (kind, workspace name or `None`, store name)
    pub store_by_name: AnswerTable<(StoreKind, Option<String>, String), StoreInfo>,
    pub stores_by_workspace: AnswerTable<(StoreKind, String), Vec<StoreInfo>>,
    pub stores: AnswerTable<StoreKind, Vec<StoreInfo>>,

    pub resource_by_id: AnswerTable<(ResourceKind, String), ResourceInfo>,
    /// Keyed by local name and by `prefix:local`
    pub resource_by_name: AnswerTable<(ResourceKind, String), ResourceInfo>,
    /// Keyed by (namespace prefix or URI, local name)
    pub resource_by_qualified_name: AnswerTable<(ResourceKind, String, String), ResourceInfo>,
    /// Keyed by (store id, local name)
    pub resource_by_store: AnswerTable<(ResourceKind, String, String), ResourceInfo>,
    pub resources_by_store: AnswerTable<(ResourceKind, String), Vec<ResourceInfo>>,
    /// Keyed by namespace id
    pub resources_by_namespace: AnswerTable<(ResourceKind, String), Vec<ResourceInfo>>,
    pub resources: AnswerTable<ResourceKind, Vec<ResourceInfo>>,

    pub layer_by_id: AnswerTable<String, Arc<LayerInfo>>,
    pub layer_by_name: AnswerTable<String, Arc<LayerInfo>>,
    pub layer_by_qualified_name: AnswerTable<(String, String), Arc<LayerInfo>>,
    pub layers: Vec<Arc<LayerInfo>>,

    pub style_by_id: AnswerTable<String, Arc<StyleInfo>>,
    pub style_by_name: AnswerTable<String, Arc<StyleInfo>>,
    pub styles: Vec<Arc<StyleInfo>>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Workspace by id and name; namespace by id, prefix and URI
    pub fn program_workspace(&mut self, workspace: &Arc<WorkspaceInfo>, namespace: &Arc<NamespaceInfo>) {
        self.workspace_by_id.program(workspace.id.clone(), Arc::clone(workspace));
        self.workspace_by_name.program(workspace.name.clone(), Arc::clone(workspace));

        self.namespace_by_id.program(namespace.id.clone(), Arc::clone(namespace));
        self.namespace_by_prefix.program(namespace.prefix.clone(), Arc::clone(namespace));
        self.namespace_by_uri.program(namespace.uri.clone(), Arc::clone(namespace));

        tracing::debug!("Programmed workspace {} ({})", workspace.name, namespace.uri);
    }

    pub fn program_data_store(&mut self, store: &Arc<DataStoreInfo>) {
        self.program_store(&StoreInfo::Data(Arc::clone(store)));
    }

    pub fn program_coverage_store(&mut self, store: &Arc<CoverageStoreInfo>) {
        self.program_store(&StoreInfo::Coverage(Arc::clone(store)));
    }

    /// Store by id, by name, and by name within its workspace
    fn program_store(&mut self, store: &StoreInfo) {
        let workspace = store.workspace().name.clone();
        for kind in store_kinds(store) {
            self.store_by_id.program((kind, store.id().to_string()), store.clone());
            self.store_by_name.program((kind, None, store.name().to_string()), store.clone());
            self.store_by_name
                .program((kind, Some(workspace.clone()), store.name().to_string()), store.clone());
        }

        tracing::debug!("Programmed {:?} store {}:{}", store.kind(), workspace, store.name());
    }

    /// Resource by id, by name, by qualified name (prefix and URI) and by store
    pub fn program_resource(&mut self, resource: &ResourceInfo) {
        let name = resource.name().to_string();
        let namespace = Arc::clone(resource.namespace());
        let store_id = resource.store().id().to_string();

        for kind in resource_kinds(resource) {
            self.resource_by_id.program((kind, resource.id().to_string()), resource.clone());
            self.resource_by_name.program((kind, name.clone()), resource.clone());
            self.resource_by_name
                .program((kind, format!("{}:{}", namespace.prefix, name)), resource.clone());
            self.resource_by_qualified_name
                .program((kind, namespace.prefix.clone(), name.clone()), resource.clone());
            self.resource_by_qualified_name
                .program((kind, namespace.uri.clone(), name.clone()), resource.clone());
            self.resource_by_store.program((kind, store_id.clone(), name.clone()), resource.clone());
        }

        tracing::debug!("Programmed {:?} {}:{}", resource.kind(), namespace.prefix, name);
    }

    /// Layer by id, by name, by `prefix:name` and by qualified name
    pub fn program_layer(&mut self, layer: &Arc<LayerInfo>) {
        let namespace = Arc::clone(layer.resource.namespace());

        self.layer_by_id.program(layer.id.clone(), Arc::clone(layer));
        self.layer_by_name.program(layer.name.clone(), Arc::clone(layer));
        self.layer_by_name.program(layer.prefixed_name(), Arc::clone(layer));
        self.layer_by_qualified_name
            .program((namespace.prefix.clone(), layer.name.clone()), Arc::clone(layer));
        self.layer_by_qualified_name
            .program((namespace.uri.clone(), layer.name.clone()), Arc::clone(layer));
    }

    pub fn program_style(&mut self, style: &Arc<StyleInfo>) {
        self.style_by_id.program(style.id.clone(), Arc::clone(style));
        self.style_by_name.program(style.name.clone(), Arc::clone(style));
        tracing::debug!("Programmed style {}", style.name);
    }

    /// Resources of one store, for its kind and for any kind
    pub fn program_resources_by_store(&mut self, store: &StoreInfo, kind: ResourceKind, resources: Vec<ResourceInfo>) {
        self.resources_by_store.program((kind, store.id().to_string()), resources.clone());
        self.resources_by_store.program((ResourceKind::Any, store.id().to_string()), resources);
    }

    /// Stores of one workspace, per kind and for the union
    pub fn program_stores_by_workspace(
        &mut self,
        workspace: &WorkspaceInfo,
        data_stores: &[Arc<DataStoreInfo>],
        coverage_stores: &[Arc<CoverageStoreInfo>],
    ) {
        let data: Vec<StoreInfo> = data_stores.iter().cloned().map(StoreInfo::Data).collect();
        let coverage: Vec<StoreInfo> = coverage_stores.iter().cloned().map(StoreInfo::Coverage).collect();
        let all: Vec<StoreInfo> = data.iter().chain(coverage.iter()).cloned().collect();

        let name = workspace.name.clone();
        self.stores_by_workspace.program((StoreKind::Data, name.clone()), data);
        self.stores_by_workspace.program((StoreKind::Coverage, name.clone()), coverage);
        self.stores_by_workspace.program((StoreKind::Any, name), all);
    }

    /// Resources of one namespace, per kind and for the union
    pub fn program_resources_by_namespace(
        &mut self,
        namespace: &NamespaceInfo,
        feature_types: Vec<ResourceInfo>,
        coverages: Vec<ResourceInfo>,
    ) {
        let all: Vec<ResourceInfo> = feature_types.iter().chain(coverages.iter()).cloned().collect();
        let id = namespace.id.clone();
        self.resources_by_namespace.program((ResourceKind::FeatureType, id.clone()), feature_types);
        self.resources_by_namespace.program((ResourceKind::Coverage, id.clone()), coverages);
        self.resources_by_namespace.program((ResourceKind::Any, id), all);
    }

    /// Catalog-wide enumerations and defaults
    pub fn program_catalog(&mut self, contents: CatalogContents) {
        let CatalogContents {
            workspaces,
            namespaces,
            data_stores,
            coverage_stores,
            feature_types,
            coverages,
            layers,
            styles,
        } = contents;

        let resources: Vec<ResourceInfo> = feature_types.iter().chain(coverages.iter()).cloned().collect();
        self.resources.program(ResourceKind::Any, resources);
        self.resources.program(ResourceKind::FeatureType, feature_types);
        self.resources.program(ResourceKind::Coverage, coverages);

        let data: Vec<StoreInfo> = data_stores.into_iter().map(StoreInfo::Data).collect();
        let coverage: Vec<StoreInfo> = coverage_stores.into_iter().map(StoreInfo::Coverage).collect();
        let stores: Vec<StoreInfo> = data.iter().chain(coverage.iter()).cloned().collect();
        self.stores.program(StoreKind::Any, stores);
        self.stores.program(StoreKind::Data, data);
        self.stores.program(StoreKind::Coverage, coverage);

        self.default_workspace = workspaces.first().cloned();
        self.default_namespace = namespaces.first().cloned();
        self.workspaces = workspaces;
        self.namespaces = namespaces;
        self.layers = layers;
        self.styles = styles;
    }

    /// Resolve a qualified name; a name without namespace resolves as a local name
    pub fn resource_by_qualified(&self, name: &QualifiedName, kind: ResourceKind) -> Option<ResourceInfo> {
        match &name.namespace {
            Some(ns) => self.resource_by_qualified_name.answer(&(kind, ns.clone(), name.local.clone())),
            None => self.resource_by_name.answer(&(kind, name.local.clone())),
        }
    }

    pub fn layer_by_qualified(&self, name: &QualifiedName) -> Option<Arc<LayerInfo>> {
        match &name.namespace {
            Some(ns) => self.layer_by_qualified_name.answer(&(ns.clone(), name.local.clone())),
            None => self.layer_by_name.answer(name.local.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_programmed_wins() {
        let mut table: AnswerTable<String, u32> = AnswerTable::default();
        assert!(table.program("a".to_string(), 1));
        assert!(!table.program("a".to_string(), 2));
        assert_eq!(table.answer("a"), Some(1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_unprogrammed_answers_are_benign() {
        let table: AnswerTable<String, Vec<u32>> = AnswerTable::default();
        assert!(table.is_empty());
        assert_eq!(table.answer("missing"), None);
        assert!(table.answer_list("missing").is_empty());
    }

    #[test]
    fn test_answers_are_idempotent() {
        let mut table: AnswerTable<(StoreKind, String), Vec<u32>> = AnswerTable::default();
        table.program((StoreKind::Data, "cite".to_string()), vec![1, 2]);
        for _ in 0..3 {
            assert_eq!(table.answer_list(&(StoreKind::Data, "cite".to_string())), vec![1, 2]);
        }
        assert!(table.answer_list(&(StoreKind::Coverage, "cite".to_string())).is_empty());
    }

    #[test]
    fn test_workspace_programming() {
        let mut answers = Answers::new();
        let ws = Arc::new(WorkspaceInfo { id: "ws1".into(), name: "cite".into(), metadata: Default::default() });
        let ns = Arc::new(NamespaceInfo {
            id: "ns1".into(),
            prefix: "cite".into(),
            uri: "http://www.opengis.net/cite".into(),
            metadata: Default::default(),
        });
        answers.program_workspace(&ws, &ns);

        assert_eq!(answers.workspace_by_id.answer("ws1"), Some(Arc::clone(&ws)));
        assert_eq!(answers.workspace_by_name.answer("cite"), Some(Arc::clone(&ws)));
        assert_eq!(answers.namespace_by_uri.answer("http://www.opengis.net/cite"), Some(Arc::clone(&ns)));
        assert_eq!(answers.namespace_by_prefix.answer("cite"), Some(ns));
    }
}
