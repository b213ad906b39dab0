//! Staged commit walker
//!
//! `MockCatalogBuilder` consumes a nested description in depth-first order:
//!
//! ```text
//! style* (workspace (dataStore featureType+ commit | coverageStore coverage commit)* commit)+ commit
//! ```
//!
//! Each scope opener returns a handle that the nested calls must present, so a
//! resource can only be added to the store currently open. `commit` closes the
//! innermost non-empty scope: resources of a store, then stores of a
//! workspace, then the whole catalog, which finalizes it.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use geocat_core::builder::CatalogBuilder;
use geocat_core::formats::FormatRegistry;
use geocat_core::models::{
    CoverageInfo, CoverageStoreInfo, DataStoreInfo, FeatureTypeInfo, LayerInfo, NamespaceInfo,
    ProjectionPolicy, ReferencedEnvelope, ResourceInfo, ResourceKind, StoreInfo, StyleInfo,
    WorkspaceInfo,
};
use geocat_core::{GeocatError, Result};

use crate::answers::{Answers, CatalogContents};
use crate::factory::EntityFactory;
use crate::materializer::FixtureMaterializer;
use crate::mock_catalog::MockCatalog;
use crate::resources::ResourceSource;

/// EPSG code of resources missing from the SRS table
pub const DEFAULT_SRS: u32 = 4326;

/// Handle to the workspace currently open
#[derive(Debug, Clone)]
pub struct WorkspaceScope {
    workspace: Arc<WorkspaceInfo>,
    namespace: Arc<NamespaceInfo>,
}

impl WorkspaceScope {
    pub fn workspace(&self) -> &Arc<WorkspaceInfo> {
        &self.workspace
    }

    pub fn namespace(&self) -> &Arc<NamespaceInfo> {
        &self.namespace
    }
}

/// Handle to a data store open for feature types
#[derive(Debug, Clone)]
pub struct DataStoreScope {
    store: Arc<DataStoreInfo>,
    namespace: Arc<NamespaceInfo>,
}

impl DataStoreScope {
    pub fn store(&self) -> &Arc<DataStoreInfo> {
        &self.store
    }
}

/// Handle to a coverage store open for its coverage
#[derive(Debug, Clone)]
pub struct CoverageStoreScope {
    store: Arc<CoverageStoreInfo>,
    namespace: Arc<NamespaceInfo>,
    filename: String,
    format: String,
}

impl CoverageStoreScope {
    pub fn store(&self) -> &Arc<CoverageStoreInfo> {
        &self.store
    }
}

/// Builds a `MockCatalog` and its on-disk fixture files
#[derive(Debug)]
pub struct MockCatalogBuilder {
    materializer: FixtureMaterializer,
    factory: EntityFactory,
    catalog_builder: CatalogBuilder,
    srs_codes: BTreeMap<String, u32>,
    answers: Answers,

    // current scopes
    workspaces: Vec<Arc<WorkspaceInfo>>,
    namespaces: Vec<Arc<NamespaceInfo>>,
    data_stores: Vec<Arc<DataStoreInfo>>,
    coverage_stores: Vec<Arc<CoverageStoreInfo>>,
    feature_types: Vec<Arc<FeatureTypeInfo>>,
    coverages: Vec<Arc<CoverageInfo>>,
    layers: Vec<Arc<LayerInfo>>,
    styles: Vec<Arc<StyleInfo>>,

    // promoted by commits
    feature_types_by_namespace: Vec<Arc<FeatureTypeInfo>>,
    coverages_by_namespace: Vec<Arc<CoverageInfo>>,
    feature_types_all: Vec<Arc<FeatureTypeInfo>>,
    coverages_all: Vec<Arc<CoverageInfo>>,
    data_stores_all: Vec<Arc<DataStoreInfo>>,
    coverage_stores_all: Vec<Arc<CoverageStoreInfo>>,

    catalog: Option<Arc<MockCatalog>>,
}

impl MockCatalogBuilder {
    /// Builder writing fixture files below `root`, reading them from `resources`
    pub fn new(root: &Path, resources: Arc<dyn ResourceSource>) -> Self {
        Self {
            materializer: FixtureMaterializer::new(root, resources),
            factory: EntityFactory::new(Arc::new(FormatRegistry::with_defaults())),
            catalog_builder: CatalogBuilder::new(),
            srs_codes: BTreeMap::new(),
            answers: Answers::new(),
            workspaces: Vec::new(),
            namespaces: Vec::new(),
            data_stores: Vec::new(),
            coverage_stores: Vec::new(),
            feature_types: Vec::new(),
            coverages: Vec::new(),
            layers: Vec::new(),
            styles: Vec::new(),
            feature_types_by_namespace: Vec::new(),
            coverages_by_namespace: Vec::new(),
            feature_types_all: Vec::new(),
            coverages_all: Vec::new(),
            data_stores_all: Vec::new(),
            coverage_stores_all: Vec::new(),
            catalog: None,
        }
    }

    /// Use `formats` to probe coverage files
    pub fn with_formats(mut self, formats: Arc<FormatRegistry>) -> Self {
        self.factory = EntityFactory::new(formats);
        self
    }

    /// Declare resource SRS codes by resource name
    pub fn with_srs_codes(mut self, srs_codes: BTreeMap<String, u32>) -> Self {
        self.srs_codes = srs_codes;
        self
    }

    pub fn root(&self) -> &Path {
        self.materializer.root()
    }

    /// EPSG code declared for a resource
    pub fn srs_code(&self, name: &str) -> u32 {
        self.srs_codes.get(name).copied().unwrap_or(DEFAULT_SRS)
    }

    pub fn is_finalized(&self) -> bool {
        self.catalog.is_some()
    }

    /// The finalized catalog
    pub fn catalog(&self) -> Result<Arc<MockCatalog>> {
        self.catalog.clone().ok_or(GeocatError::CatalogNotFinalized)
    }

    pub fn into_catalog(self) -> Result<Arc<MockCatalog>> {
        self.catalog.ok_or(GeocatError::CatalogNotFinalized)
    }

    fn ensure_building(&self) -> Result<()> {
        if self.is_finalized() {
            return Err(GeocatError::CatalogFinalized);
        }
        Ok(())
    }

    /// Register the style stored in `<name>.sld`
    ///
    /// Returns `None` when no such document exists; the style is skipped and
    /// later layers keep using the previously registered one.
    pub fn style(&mut self, name: &str) -> Result<Option<Arc<StyleInfo>>> {
        self.ensure_building()?;

        let filename = format!("{}.sld", name);
        let Some(bytes) = self.materializer.resources().open(&filename) else {
            tracing::warn!("No style document {}, skipping style {}", filename, name);
            return Ok(None);
        };
        let document = String::from_utf8(bytes.to_vec()).map_err(|e| GeocatError::InvalidStyle {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        let style = self.factory.style(name, document);
        self.answers.program_style(&style);
        self.styles.push(Arc::clone(&style));
        Ok(Some(style))
    }

    /// Open a workspace and its namespace
    pub fn workspace(&mut self, name: &str, uri: &str) -> Result<WorkspaceScope> {
        self.ensure_building()?;

        let workspace = self.factory.workspace(name);
        let namespace = self.factory.namespace(name, uri);
        self.answers.program_workspace(&workspace, &namespace);
        self.workspaces.push(Arc::clone(&workspace));
        self.namespaces.push(Arc::clone(&namespace));

        Ok(WorkspaceScope { workspace, namespace })
    }

    /// Open a property data store reading from `<root>/<name>`
    pub fn data_store(&mut self, scope: &WorkspaceScope, name: &str) -> Result<DataStoreScope> {
        self.ensure_building()?;
        self.check_workspace(scope)?;

        let directory = self.materializer.ensure_store_dir(name)?;
        let store = self.factory.data_store(name, &scope.workspace, &scope.namespace, &directory);
        self.answers.program_data_store(&store);
        self.data_stores.push(Arc::clone(&store));

        Ok(DataStoreScope { store, namespace: Arc::clone(&scope.namespace) })
    }

    /// Open a coverage store over `<root>/<name>/<filename>`, declared in `format`
    pub fn coverage_store(
        &mut self,
        scope: &WorkspaceScope,
        name: &str,
        filename: &str,
        format: &str,
    ) -> Result<CoverageStoreScope> {
        self.ensure_building()?;
        self.check_workspace(scope)?;

        let file = self.materializer.root().join(name).join(filename);
        let store = self.factory.coverage_store(name, &scope.workspace, &file)?;
        self.answers.program_coverage_store(&store);
        self.coverage_stores.push(Arc::clone(&store));

        Ok(CoverageStoreScope {
            store,
            namespace: Arc::clone(&scope.namespace),
            filename: filename.to_string(),
            format: format.to_string(),
        })
    }

    /// Add a feature type with no native bounds and world lat/lon bounds
    pub fn feature_type(&mut self, scope: &DataStoreScope, name: &str) -> Result<Arc<FeatureTypeInfo>> {
        self.feature_type_with(scope, name, ProjectionPolicy::None, None, ReferencedEnvelope::world())
    }

    /// Add a feature type backed by `<name>.properties`, plus its layer
    pub fn feature_type_with(
        &mut self,
        scope: &DataStoreScope,
        name: &str,
        projection_policy: ProjectionPolicy,
        native_bounding_box: Option<ReferencedEnvelope>,
        lat_lon_bounding_box: ReferencedEnvelope,
    ) -> Result<Arc<FeatureTypeInfo>> {
        self.ensure_building()?;
        if !self.data_stores.last().is_some_and(|s| Arc::ptr_eq(s, &scope.store)) {
            return Err(GeocatError::ScopeMismatch {
                reason: format!("data store {} is not open", scope.store.name),
            });
        }

        self.materializer.copy_to_store(&scope.store.name, &format!("{}.properties", name))?;

        let header = self.factory.resource_header(
            name,
            &scope.namespace,
            self.srs_code(name),
            projection_policy,
            native_bounding_box,
            lat_lon_bounding_box,
        )?;
        let feature_type = self.factory.feature_type(header, &scope.store);
        let resource = ResourceInfo::FeatureType(Arc::clone(&feature_type));

        self.answers.program_resource(&resource);
        self.feature_types.push(Arc::clone(&feature_type));
        self.create_layer(resource)?;

        Ok(feature_type)
    }

    /// Add the coverage of a coverage store, plus its layer
    ///
    /// The raster is copied into the store directory and opened with the probed
    /// format, which must be the declared one. Metadata comes from the catalog
    /// builder run against the real reader.
    pub fn coverage(&mut self, scope: &CoverageStoreScope, name: &str) -> Result<Arc<CoverageInfo>> {
        self.ensure_building()?;
        if !self.coverage_stores.last().is_some_and(|s| Arc::ptr_eq(s, &scope.store)) {
            return Err(GeocatError::ScopeMismatch {
                reason: format!("coverage store {} is not open", scope.store.name),
            });
        }

        let store = &scope.store;
        let path = self.materializer.copy_to_store(&store.name, &scope.filename)?;

        let format = store.format()?;
        if !format.name().eq_ignore_ascii_case(&scope.format) {
            return Err(GeocatError::FormatMismatch {
                path,
                declared: scope.format.clone(),
                found: format.name().to_string(),
            });
        }

        let reader = format.reader(&path).map_err(|e| GeocatError::NoReader {
            url: store.url.clone(),
            reason: e.to_string(),
        })?;
        let metadata = self.catalog_builder.build_coverage(&store.name, reader.as_ref())?;

        // the raster's own CRS unless the table declares one
        let srs_code = self.srs_codes.get(name).copied().unwrap_or(metadata.native_crs.epsg);
        let header = self.factory.resource_header(
            name,
            &scope.namespace,
            srs_code,
            metadata.projection_policy,
            Some(metadata.native_bounding_box.clone()),
            metadata.lat_lon_bounding_box.clone(),
        )?;
        let coverage = self.factory.coverage(header, store, metadata, reader);
        let resource = ResourceInfo::Coverage(Arc::clone(&coverage));

        self.answers.program_resource(&resource);
        self.coverages.push(Arc::clone(&coverage));
        self.create_layer(resource)?;

        Ok(coverage)
    }

    /// Publish a layer over `resource` with the most recently registered style
    fn create_layer(&mut self, resource: ResourceInfo) -> Result<()> {
        let style = self
            .styles
            .last()
            .cloned()
            .ok_or_else(|| GeocatError::NoStyle { layer: resource.name().to_string() })?;

        let layer = self.factory.layer(resource, style);
        self.answers.program_layer(&layer);
        self.layers.push(layer);
        Ok(())
    }

    fn check_workspace(&self, scope: &WorkspaceScope) -> Result<()> {
        if self.workspaces.last().is_some_and(|w| Arc::ptr_eq(w, &scope.workspace)) {
            Ok(())
        } else {
            Err(GeocatError::ScopeMismatch {
                reason: format!("workspace {} is not open", scope.workspace.name),
            })
        }
    }

    /// Close the innermost open scope
    pub fn commit(&mut self) -> Result<&mut Self> {
        self.ensure_building()?;

        if !self.feature_types.is_empty() || !self.coverages.is_empty() {
            self.commit_resources();
        } else if !self.data_stores.is_empty() || !self.coverage_stores.is_empty() {
            self.commit_stores()?;
        } else if !self.workspaces.is_empty() {
            self.commit_catalog();
        } else {
            tracing::debug!("Nothing to commit");
        }

        Ok(self)
    }

    /// Publish the resources of the current store and move them to the namespace scope
    fn commit_resources(&mut self) {
        if let Some(store) = self.data_stores.last().filter(|_| !self.feature_types.is_empty()) {
            let resources = self.feature_types.iter().cloned().map(ResourceInfo::FeatureType).collect();
            self.answers.program_resources_by_store(
                &StoreInfo::Data(Arc::clone(store)),
                ResourceKind::FeatureType,
                resources,
            );
        }

        if let Some(store) = self.coverage_stores.last().filter(|_| !self.coverages.is_empty()) {
            let resources = self.coverages.iter().cloned().map(ResourceInfo::Coverage).collect();
            self.answers.program_resources_by_store(
                &StoreInfo::Coverage(Arc::clone(store)),
                ResourceKind::Coverage,
                resources,
            );
        }

        self.feature_types_by_namespace.append(&mut self.feature_types);
        self.coverages_by_namespace.append(&mut self.coverages);
    }

    /// Publish the stores and resources of the current workspace
    fn commit_stores(&mut self) -> Result<()> {
        let (Some(workspace), Some(namespace)) = (self.workspaces.last(), self.namespaces.last()) else {
            return Err(GeocatError::ScopeMismatch { reason: "stores committed outside a workspace".to_string() });
        };

        self.answers.program_stores_by_workspace(workspace, &self.data_stores, &self.coverage_stores);
        self.answers.program_resources_by_namespace(
            namespace,
            self.feature_types_by_namespace.iter().cloned().map(ResourceInfo::FeatureType).collect(),
            self.coverages_by_namespace.iter().cloned().map(ResourceInfo::Coverage).collect(),
        );

        self.data_stores_all.append(&mut self.data_stores);
        self.coverage_stores_all.append(&mut self.coverage_stores);
        self.feature_types_all.append(&mut self.feature_types_by_namespace);
        self.coverages_all.append(&mut self.coverages_by_namespace);
        Ok(())
    }

    /// Publish the catalog-wide enumerations and finalize the catalog
    fn commit_catalog(&mut self) {
        let contents = CatalogContents {
            workspaces: std::mem::take(&mut self.workspaces),
            namespaces: std::mem::take(&mut self.namespaces),
            data_stores: std::mem::take(&mut self.data_stores_all),
            coverage_stores: std::mem::take(&mut self.coverage_stores_all),
            feature_types: self.feature_types_all.drain(..).map(ResourceInfo::FeatureType).collect(),
            coverages: self.coverages_all.drain(..).map(ResourceInfo::Coverage).collect(),
            layers: std::mem::take(&mut self.layers),
            styles: std::mem::take(&mut self.styles),
        };

        tracing::info!(
            "Finalized mock catalog: {} workspaces, {} data stores, {} coverage stores, {} feature types, {} coverages, {} layers, {} styles",
            contents.workspaces.len(),
            contents.data_stores.len(),
            contents.coverage_stores.len(),
            contents.feature_types.len(),
            contents.coverages.len(),
            contents.layers.len(),
            contents.styles.len()
        );

        self.answers.program_catalog(contents);
        let answers = std::mem::take(&mut self.answers);
        self.catalog = Some(Arc::new(MockCatalog::new(answers, self.materializer.root().to_path_buf())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{EmbeddedResources, MemoryResources};
    use geocat_core::ports::Catalog;
    use tempfile::TempDir;

    const CITE_URI: &str = "http://www.opengis.net/cite";

    fn builder(dir: &TempDir) -> MockCatalogBuilder {
        MockCatalogBuilder::new(dir.path(), Arc::new(EmbeddedResources))
    }

    #[test]
    fn test_minimal_catalog() {
        let dir = TempDir::new().unwrap();
        let mut b = builder(&dir);
        b.style("Default").unwrap();
        let ws = b.workspace("cite", CITE_URI).unwrap();
        let ds = b.data_store(&ws, "cite").unwrap();
        b.feature_type(&ds, "Lakes").unwrap();
        b.feature_type(&ds, "Ponds").unwrap();
        b.commit().unwrap().commit().unwrap().commit().unwrap();

        let catalog = b.catalog().unwrap();
        let names: Vec<_> = catalog.get_feature_types().iter().map(|f| f.header.name.clone()).collect();
        assert_eq!(names, vec!["Lakes", "Ponds"]);
        assert_eq!(catalog.get_default_workspace().unwrap().name, "cite");
        assert!(dir.path().join("cite").join("Ponds.properties").is_file());
        assert_eq!(catalog.get_layers().len(), 2);
    }

    #[test]
    fn test_catalog_not_finalized() {
        let dir = TempDir::new().unwrap();
        let mut b = builder(&dir);
        b.workspace("gs", "http://geoserver.org").unwrap();
        assert!(matches!(b.catalog(), Err(GeocatError::CatalogNotFinalized)));
    }

    #[test]
    fn test_builder_rejects_changes_after_finalize() {
        let dir = TempDir::new().unwrap();
        let mut b = builder(&dir);
        b.workspace("gs", "http://geoserver.org").unwrap();
        b.commit().unwrap();

        assert!(b.is_finalized());
        assert!(matches!(b.workspace("late", "urn:late"), Err(GeocatError::CatalogFinalized)));
        assert!(matches!(b.commit().map(|_| ()), Err(GeocatError::CatalogFinalized)));
    }

    #[test]
    fn test_stale_store_scope_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut b = builder(&dir);
        b.style("Default").unwrap();
        let ws = b.workspace("cite", CITE_URI).unwrap();
        let ds = b.data_store(&ws, "cite").unwrap();
        b.feature_type(&ds, "Lakes").unwrap();
        b.commit().unwrap().commit().unwrap();

        let err = b.feature_type(&ds, "Ponds").unwrap_err();
        assert!(matches!(err, GeocatError::ScopeMismatch { .. }));
    }

    #[test]
    fn test_closed_workspace_scope_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut b = builder(&dir);
        let first = b.workspace("cgf", "http://www.opengis.net/cite/geometry").unwrap();
        b.workspace("cdf", "http://www.opengis.net/cite/data").unwrap();

        assert!(matches!(b.data_store(&first, "cgf"), Err(GeocatError::ScopeMismatch { .. })));
    }

    #[test]
    fn test_layer_requires_style() {
        let dir = TempDir::new().unwrap();
        let mut b = builder(&dir);
        let ws = b.workspace("cite", CITE_URI).unwrap();
        let ds = b.data_store(&ws, "cite").unwrap();

        let err = b.feature_type(&ds, "Lakes").unwrap_err();
        assert!(matches!(err, GeocatError::NoStyle { ref layer } if layer == "Lakes"));
    }

    #[test]
    fn test_missing_style_is_skipped() {
        let dir = TempDir::new().unwrap();
        let mut b = builder(&dir);
        assert!(b.style("Default").unwrap().is_some());
        assert!(b.style("Lines").unwrap().is_none());

        let ws = b.workspace("cgf", "http://www.opengis.net/cite/geometry").unwrap();
        let ds = b.data_store(&ws, "cgf").unwrap();
        b.feature_type(&ds, "Lines").unwrap();
        b.commit().unwrap().commit().unwrap().commit().unwrap();

        let catalog = b.catalog().unwrap();
        let layer = catalog.get_layer_by_name("cgf:Lines").unwrap();
        assert_eq!(layer.default_style.name, "Default");
        assert_eq!(catalog.get_styles().len(), 1);
    }

    #[test]
    fn test_missing_property_file_fails() {
        let dir = TempDir::new().unwrap();
        let mut b = builder(&dir);
        b.style("Default").unwrap();
        let ws = b.workspace("cite", CITE_URI).unwrap();
        let ds = b.data_store(&ws, "cite").unwrap();

        let err = b.feature_type(&ds, "Unknown").unwrap_err();
        assert!(matches!(err, GeocatError::ResourceNotFound { .. }));
    }

    #[test]
    fn test_coverage_metadata_and_format() {
        let dir = TempDir::new().unwrap();
        let mut b = builder(&dir);
        b.style("raster").unwrap();
        let ws = b.workspace("wcs", "http://www.opengis.net/wcs/1.1.1").unwrap();
        let cs = b.coverage_store(&ws, "DEM", "tazdem.asc", "ArcGrid").unwrap();
        let coverage = b.coverage(&cs, "DEM").unwrap();

        assert_eq!(coverage.header.projection_policy, ProjectionPolicy::ForceDeclared);
        assert_eq!(coverage.header.native_bounding_box.as_ref().map(|e| e.min_x), Some(145.0));
        assert_eq!(coverage.dimensions[0].null_values, vec![-9999.0]);
        assert_eq!(coverage.store.type_name().unwrap(), "ArcGrid");
        assert!(dir.path().join("DEM").join("tazdem.asc").is_file());
    }

    #[test]
    fn test_declared_format_must_match() {
        let dir = TempDir::new().unwrap();
        let mut b = builder(&dir);
        b.style("raster").unwrap();
        let ws = b.workspace("wcs", "http://www.opengis.net/wcs/1.1.1").unwrap();
        let cs = b.coverage_store(&ws, "World", "world.grass", "ArcGrid").unwrap();

        let err = b.coverage(&cs, "World").unwrap_err();
        assert!(matches!(err, GeocatError::FormatMismatch { ref found, .. } if found == "GRASS"));
    }

    #[test]
    fn test_unknown_raster_has_no_format() {
        let dir = TempDir::new().unwrap();
        let mut resources = MemoryResources::new();
        resources.insert("raster.sld", EmbeddedResources.open("raster.sld").unwrap().to_vec());
        resources.insert("blob.bin", vec![0u8, 1, 2, 3]);
        let mut b = MockCatalogBuilder::new(dir.path(), Arc::new(resources));
        b.style("raster").unwrap();
        let ws = b.workspace("wcs", "http://www.opengis.net/wcs/1.1.1").unwrap();
        let cs = b.coverage_store(&ws, "Blob", "blob.bin", "ArcGrid").unwrap();

        assert!(matches!(b.coverage(&cs, "Blob"), Err(GeocatError::NoFormat { .. })));
    }

    #[test]
    fn test_projected_coverage() {
        let dir = TempDir::new().unwrap();
        let mut resources = MemoryResources::new();
        resources.insert("raster.sld", EmbeddedResources.open("raster.sld").unwrap().to_vec());
        resources.insert(
            "utm.asc",
            b"ncols 2\nnrows 2\nxllcorner 500000\nyllcorner 4500000\ncellsize 1000\n1 2\n3 4\n".to_vec(),
        );
        std::fs::create_dir_all(dir.path().join("UTM")).unwrap();
        std::fs::write(dir.path().join("UTM").join("utm.prj"), "EPSG:32615").unwrap();

        let mut b = MockCatalogBuilder::new(dir.path(), Arc::new(resources));
        b.style("raster").unwrap();
        let ws = b.workspace("wcs", "http://www.opengis.net/wcs/1.1.1").unwrap();
        let cs = b.coverage_store(&ws, "UTM", "utm.asc", "ArcGrid").unwrap();
        let coverage = b.coverage(&cs, "UTM").unwrap();

        assert_eq!(coverage.header.srs, "EPSG:32615");
        assert_eq!(coverage.header.native_crs.epsg, 32615);
        assert_eq!(coverage.header.native_bounding_box.as_ref().map(|e| e.crs.epsg), Some(32615));

        let lat_lon = &coverage.header.lat_lon_bounding_box;
        assert_eq!(lat_lon.crs.epsg, 4326);
        assert!((lat_lon.min_x + 93.0).abs() < 0.01);
        assert!(lat_lon.min_y > 40.5 && lat_lon.max_y < 40.7);
    }

    #[test]
    fn test_srs_table_overrides_raster_crs() {
        let dir = TempDir::new().unwrap();
        let mut b = builder(&dir).with_srs_codes(BTreeMap::from([("DEM".to_string(), 4269)]));
        b.style("raster").unwrap();
        let ws = b.workspace("wcs", "http://www.opengis.net/wcs/1.1.1").unwrap();
        let cs = b.coverage_store(&ws, "DEM", "tazdem.asc", "ArcGrid").unwrap();
        let coverage = b.coverage(&cs, "DEM").unwrap();

        assert_eq!(coverage.header.srs, "EPSG:4269");
    }

    #[test]
    fn test_srs_codes() {
        let dir = TempDir::new().unwrap();
        let b = builder(&dir).with_srs_codes(BTreeMap::from([("Lakes".to_string(), 32615)]));
        assert_eq!(b.srs_code("Lakes"), 32615);
        assert_eq!(b.srs_code("Buildings"), DEFAULT_SRS);
    }
}
