//! Entity factory
//!
//! Builds one catalog entity at a time with its constant attributes set and its
//! expensive accessors wired as lazy thunks.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use geocat_core::builder::CoverageMetadata;
use geocat_core::formats::{sld, FeatureDataAccess, FormatRegistry, GridCoverageReader, GridFormat, PropertyDataStore};
use geocat_core::models::store::{DIRECTORY_PARAM, NAMESPACE_PARAM};
use geocat_core::models::{
    file_url, ConnectionParameters, CoverageInfo, CoverageStoreInfo, DataStoreInfo, FeatureTypeInfo,
    Keyword, LayerInfo, LayerType, Lazy, MetadataMap, NamespaceInfo, ProjectionPolicy,
    ReferencedEnvelope, ResourceHeader, ResourceInfo, StyleInfo, WorkspaceInfo, SLD_10,
};
use geocat_core::{referencing, Result};

use crate::ids::new_id;

/// Decimal places advertised for feature type output
pub const NUM_DECIMALS: u32 = 8;

/// Creates catalog entities with fresh identifiers
#[derive(Debug, Clone)]
pub struct EntityFactory {
    formats: Arc<FormatRegistry>,
}

impl EntityFactory {
    pub fn new(formats: Arc<FormatRegistry>) -> Self {
        Self { formats }
    }

    pub fn formats(&self) -> &Arc<FormatRegistry> {
        &self.formats
    }

    pub fn workspace(&self, name: &str) -> Arc<WorkspaceInfo> {
        Arc::new(WorkspaceInfo { id: new_id(), name: name.to_string(), metadata: MetadataMap::new() })
    }

    /// Namespace paired with the workspace of the same name
    pub fn namespace(&self, prefix: &str, uri: &str) -> Arc<NamespaceInfo> {
        Arc::new(NamespaceInfo {
            id: new_id(),
            prefix: prefix.to_string(),
            uri: uri.to_string(),
            metadata: MetadataMap::new(),
        })
    }

    /// Data store over a directory of property files
    pub fn data_store(
        &self,
        name: &str,
        workspace: &Arc<WorkspaceInfo>,
        namespace: &NamespaceInfo,
        directory: &Path,
    ) -> Arc<DataStoreInfo> {
        let mut connection_parameters = ConnectionParameters::new();
        connection_parameters.insert(DIRECTORY_PARAM.to_string(), directory.display().to_string());
        connection_parameters.insert(NAMESPACE_PARAM.to_string(), namespace.uri.clone());

        let dir = directory.to_path_buf();
        let uri = namespace.uri.clone();
        let data_access = Lazy::new(move || {
            let store: Arc<dyn FeatureDataAccess> =
                Arc::new(PropertyDataStore::new(dir.clone(), Some(uri.clone())));
            Ok(store)
        });

        Arc::new(DataStoreInfo {
            id: new_id(),
            name: name.to_string(),
            workspace: Arc::clone(workspace),
            enabled: true,
            connection_parameters,
            data_access,
        })
    }

    /// Coverage store over a single raster; the format is probed on first access
    pub fn coverage_store(
        &self,
        name: &str,
        workspace: &Arc<WorkspaceInfo>,
        file: &Path,
    ) -> Result<Arc<CoverageStoreInfo>> {
        let url = file_url(file)?;
        let formats = Arc::clone(&self.formats);
        let path: PathBuf = file.to_path_buf();
        let format = Lazy::new(move || -> Result<Arc<dyn GridFormat>> { formats.find_format(&path) });

        Ok(Arc::new(CoverageStoreInfo {
            id: new_id(),
            name: name.to_string(),
            workspace: Arc::clone(workspace),
            enabled: true,
            url,
            connection_parameters: ConnectionParameters::new(),
            format,
        }))
    }

    /// Attributes shared by feature types and coverages
    pub fn resource_header(
        &self,
        name: &str,
        namespace: &Arc<NamespaceInfo>,
        srs_code: u32,
        projection_policy: ProjectionPolicy,
        native_bounding_box: Option<ReferencedEnvelope>,
        lat_lon_bounding_box: ReferencedEnvelope,
    ) -> Result<ResourceHeader> {
        let native_crs = referencing::decode(srs_code)?;

        Ok(ResourceHeader {
            id: new_id(),
            name: name.to_string(),
            native_name: name.to_string(),
            namespace: Arc::clone(namespace),
            title: name.to_string(),
            abstract_: format!("abstract about {}", name),
            description: None,
            keywords: vec![Keyword::new(name)],
            srs: format!("EPSG:{}", srs_code),
            native_crs,
            native_bounding_box,
            lat_lon_bounding_box,
            projection_policy,
            enabled: true,
            advertised: true,
            metadata: MetadataMap::new(),
        })
    }

    /// Feature type whose schema and source are opened through its data store
    pub fn feature_type(&self, header: ResourceHeader, store: &Arc<DataStoreInfo>) -> Arc<FeatureTypeInfo> {
        let schema_store = Arc::clone(store);
        let schema_name = header.name.clone();
        let feature_type = Lazy::new(move || Ok(Arc::new(schema_store.data_store()?.schema(&schema_name)?)));

        let source_store = Arc::clone(store);
        let source_name = header.name.clone();
        let feature_source =
            Lazy::new(move || Ok(Arc::new(source_store.data_store()?.feature_source(&source_name)?)));

        Arc::new(FeatureTypeInfo {
            header,
            store: Arc::clone(store),
            num_decimals: NUM_DECIMALS,
            feature_type,
            feature_source,
        })
    }

    /// Coverage carrying metadata computed against the real raster
    pub fn coverage(
        &self,
        header: ResourceHeader,
        store: &Arc<CoverageStoreInfo>,
        metadata: CoverageMetadata,
        reader: Arc<dyn GridCoverageReader>,
    ) -> Arc<CoverageInfo> {
        Arc::new(CoverageInfo {
            header,
            store: Arc::clone(store),
            default_interpolation_method: metadata.default_interpolation_method,
            interpolation_methods: metadata.interpolation_methods,
            dimensions: metadata.dimensions,
            grid: metadata.grid,
            request_srs: metadata.request_srs,
            response_srs: metadata.response_srs,
            reader: Lazy::ready(reader),
        })
    }

    /// Layer publishing `resource`, named after it
    pub fn layer(&self, resource: ResourceInfo, default_style: Arc<StyleInfo>) -> Arc<LayerInfo> {
        let layer_type = match resource {
            ResourceInfo::FeatureType(_) => LayerType::Vector,
            ResourceInfo::Coverage(_) => LayerType::Raster,
        };

        Arc::new(LayerInfo {
            id: new_id(),
            name: resource.name().to_string(),
            layer_type,
            resource,
            default_style,
            path: None,
            enabled: true,
            advertised: true,
        })
    }

    /// Global SLD 1.0 style; the document is parsed on first access
    pub fn style(&self, name: &str, document: String) -> Arc<StyleInfo> {
        let style_name = name.to_string();
        let style = Lazy::new(move || Ok(Arc::new(sld::parse(&style_name, &document)?)));

        Arc::new(StyleInfo {
            id: new_id(),
            name: name.to_string(),
            filename: format!("{}.sld", name),
            sld_version: SLD_10.to_string(),
            workspace: None,
            style,
        })
    }
}
