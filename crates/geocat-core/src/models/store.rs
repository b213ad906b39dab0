//! Data and coverage stores.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use url::Url;

use super::{Lazy, WorkspaceInfo};
use crate::error::{GeocatError, Result};
use crate::formats::{FeatureDataAccess, GridFormat};

/// Connection parameters of a store, keyed by parameter name
pub type ConnectionParameters = BTreeMap<String, String>;

/// Connection parameter holding the property file directory
pub const DIRECTORY_PARAM: &str = "directory";

/// Connection parameter holding the namespace URI of the features
pub const NAMESPACE_PARAM: &str = "namespace";

/// Store kinds accepted by store queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    /// Any store
    Any,
    /// Vector data stores
    Data,
    /// Raster coverage stores
    Coverage,
}

/// Handle to a directory of vector data
#[derive(Debug)]
pub struct DataStoreInfo {
    pub id: String,
    pub name: String,
    pub workspace: Arc<WorkspaceInfo>,
    pub enabled: bool,
    pub connection_parameters: ConnectionParameters,
    /// Opens the underlying feature data access on demand
    pub data_access: Lazy<Arc<dyn FeatureDataAccess>>,
}

impl DataStoreInfo {
    /// Open (or reuse) the feature data access behind this store
    pub fn data_store(&self) -> Result<Arc<dyn FeatureDataAccess>> {
        self.data_access.get()
    }

    /// Directory the store reads from, if configured
    pub fn directory(&self) -> Option<PathBuf> {
        self.connection_parameters.get(DIRECTORY_PARAM).map(PathBuf::from)
    }
}

/// Handle to a single raster file
#[derive(Debug)]
pub struct CoverageStoreInfo {
    pub id: String,
    pub name: String,
    pub workspace: Arc<WorkspaceInfo>,
    pub enabled: bool,
    /// `file://` URL of the raster
    pub url: String,
    pub connection_parameters: ConnectionParameters,
    /// Grid format probed from the raster on demand
    pub format: Lazy<Arc<dyn GridFormat>>,
}

impl CoverageStoreInfo {
    /// Grid format able to read the raster
    pub fn format(&self) -> Result<Arc<dyn GridFormat>> {
        self.format.get()
    }

    /// Store type, which is the name of the grid format
    pub fn type_name(&self) -> Result<String> {
        Ok(self.format()?.name().to_string())
    }

    /// Local path of the raster when the URL uses the `file` scheme
    pub fn file_path(&self) -> Option<PathBuf> {
        Url::parse(&self.url).ok()?.to_file_path().ok()
    }
}

/// Percent-encoded `file` URL of `path`, resolved against the working directory
pub fn file_url(path: &Path) -> Result<String> {
    let absolute = std::path::absolute(path)?;
    Url::from_file_path(&absolute)
        .map(String::from)
        .map_err(|_| GeocatError::FileUrl { path: absolute })
}

/// Either kind of store
#[derive(Debug, Clone)]
pub enum StoreInfo {
    Data(Arc<DataStoreInfo>),
    Coverage(Arc<CoverageStoreInfo>),
}

impl StoreInfo {
    pub fn id(&self) -> &str {
        match self {
            StoreInfo::Data(ds) => &ds.id,
            StoreInfo::Coverage(cs) => &cs.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            StoreInfo::Data(ds) => &ds.name,
            StoreInfo::Coverage(cs) => &cs.name,
        }
    }

    pub fn workspace(&self) -> &Arc<WorkspaceInfo> {
        match self {
            StoreInfo::Data(ds) => &ds.workspace,
            StoreInfo::Coverage(cs) => &cs.workspace,
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            StoreInfo::Data(ds) => ds.enabled,
            StoreInfo::Coverage(cs) => cs.enabled,
        }
    }

    pub fn kind(&self) -> StoreKind {
        match self {
            StoreInfo::Data(_) => StoreKind::Data,
            StoreInfo::Coverage(_) => StoreKind::Coverage,
        }
    }

    /// Whether a query for `kind` may return this store
    pub fn is_kind(&self, kind: StoreKind) -> bool {
        kind == StoreKind::Any || kind == self.kind()
    }

    pub fn as_data_store(&self) -> Option<&Arc<DataStoreInfo>> {
        match self {
            StoreInfo::Data(ds) => Some(ds),
            StoreInfo::Coverage(_) => None,
        }
    }

    pub fn as_coverage_store(&self) -> Option<&Arc<CoverageStoreInfo>> {
        match self {
            StoreInfo::Coverage(cs) => Some(cs),
            StoreInfo::Data(_) => None,
        }
    }
}

impl PartialEq for StoreInfo {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.id() == other.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_url_encodes_spaces() {
        let url = file_url(Path::new("/tmp/dir with space/DEM/tazdem.asc")).unwrap();
        assert_eq!(url, "file:///tmp/dir%20with%20space/DEM/tazdem.asc");

        let parsed = Url::parse(&url).unwrap().to_file_path().unwrap();
        assert_eq!(parsed, PathBuf::from("/tmp/dir with space/DEM/tazdem.asc"));
    }

    #[test]
    fn test_file_url_of_relative_path() {
        let url = file_url(Path::new("rel_root/DEM/tazdem.asc")).unwrap();
        let parsed = Url::parse(&url).unwrap();

        assert_eq!(parsed.host_str(), None);
        assert!(url.starts_with("file:///"));
        let expected = std::env::current_dir().unwrap().join("rel_root/DEM/tazdem.asc");
        assert_eq!(parsed.to_file_path().unwrap(), expected);
    }
}
