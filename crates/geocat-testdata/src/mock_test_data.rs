//! Fixture orchestrator
//!
//! `MockTestData` owns a scratch data directory and lazily builds the CITE
//! catalog into it. The catalog contents are produced by a `MockCreator`; the
//! default one, `CiteMockCreator`, emits every CITE workspace and, when raster
//! data is enabled, the `wcs` coverages.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use geocat_core::config::FixtureConfig;
use geocat_core::formats::FormatRegistry;
use geocat_core::Result;

use crate::builder::MockCatalogBuilder;
use crate::cite::{self, WorkspaceDescriptor};
use crate::ids::new_id;
use crate::mock_catalog::MockCatalog;
use crate::resources::{EmbeddedResources, ResourceSource};

/// Produces the catalog of a `MockTestData`
pub trait MockCreator: Send + Sync + fmt::Debug {
    fn create_catalog(&self, test_data: &MockTestData) -> Result<Arc<MockCatalog>>;
}

/// Creates the CITE workspaces, types and styles
#[derive(Debug, Clone, Copy, Default)]
pub struct CiteMockCreator;

impl MockCreator for CiteMockCreator {
    fn create_catalog(&self, test_data: &MockTestData) -> Result<Arc<MockCatalog>> {
        let mut b = test_data.builder();

        b.style(cite::DEFAULT_VECTOR_STYLE)?;
        for workspace in cite::VECTOR_WORKSPACES {
            self.create_workspace(&mut b, workspace)?;
        }

        if test_data.is_include_raster() {
            b.style(cite::DEFAULT_RASTER_STYLE)?;
            self.create_workspace(&mut b, &cite::RASTER_WORKSPACE)?;
        }

        b.commit()?;
        b.into_catalog()
    }
}

impl CiteMockCreator {
    /// Emit a workspace with one data store holding its types, and one
    /// coverage store per raster
    pub fn create_workspace(&self, b: &mut MockCatalogBuilder, descriptor: &WorkspaceDescriptor) -> Result<()> {
        let workspace = b.workspace(descriptor.prefix, descriptor.uri)?;

        if !descriptor.type_names.is_empty() {
            let store = b.data_store(&workspace, descriptor.prefix)?;
            for name in descriptor.type_names {
                b.style(name)?;
                b.feature_type(&store, name)?;
            }
            b.commit()?.commit()?;
        }

        if !descriptor.coverages.is_empty() {
            for coverage in descriptor.coverages {
                let store = b.coverage_store(&workspace, coverage.name, coverage.filename, coverage.format)?;
                b.coverage(&store, coverage.name)?;
                b.commit()?;
            }
            b.commit()?;
        }

        Ok(())
    }
}

/// Scratch data directory plus the mock catalog describing it
pub struct MockTestData {
    root: PathBuf,
    config: FixtureConfig,
    resources: Arc<dyn ResourceSource>,
    formats: Arc<FormatRegistry>,
    mock_creator: Arc<dyn MockCreator>,
    catalog: OnceLock<Arc<MockCatalog>>,
}

impl MockTestData {
    /// Fixture with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(FixtureConfig::with_defaults())
    }

    /// Fixture whose root is a new `mock<id>data` directory under the configured parent
    pub fn with_config(config: FixtureConfig) -> Result<Self> {
        let parent = &config.parent_dir.value;
        fs::create_dir_all(parent)?;
        let root = parent.join(format!("mock{}data", new_id()));
        fs::create_dir(&root)?;
        tracing::debug!("Created fixture root {}", root.display());

        Ok(Self {
            root,
            config,
            resources: Arc::new(EmbeddedResources),
            formats: Arc::new(FormatRegistry::with_defaults()),
            mock_creator: Arc::new(CiteMockCreator),
            catalog: OnceLock::new(),
        })
    }

    /// Read fixture files from `resources` instead of the embedded ones
    pub fn with_resources(mut self, resources: Arc<dyn ResourceSource>) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_formats(mut self, formats: Arc<FormatRegistry>) -> Self {
        self.formats = formats;
        self
    }

    pub fn config(&self) -> &FixtureConfig {
        &self.config
    }

    pub fn is_include_raster(&self) -> bool {
        self.config.include_raster.value
    }

    /// Has no effect once the catalog is built
    pub fn set_include_raster(&mut self, include_raster: bool) {
        self.config.include_raster.value = include_raster;
    }

    pub fn set_mock_creator(&mut self, mock_creator: Arc<dyn MockCreator>) {
        self.mock_creator = mock_creator;
    }

    /// EPSG codes by resource name: the CITE table, then configured overrides
    pub fn srs_codes(&self) -> BTreeMap<String, u32> {
        let mut codes = cite::srs_codes();
        codes.extend(self.config.srs_overrides.value.iter().map(|(name, code)| (name.clone(), *code)));
        codes
    }

    /// A builder writing into this fixture's root
    pub fn builder(&self) -> MockCatalogBuilder {
        MockCatalogBuilder::new(&self.root, Arc::clone(&self.resources))
            .with_formats(Arc::clone(&self.formats))
            .with_srs_codes(self.srs_codes())
    }

    /// The catalog, built on first call
    pub fn catalog(&self) -> Result<Arc<MockCatalog>> {
        if let Some(catalog) = self.catalog.get() {
            return Ok(Arc::clone(catalog));
        }

        let catalog = self.mock_creator.create_catalog(self)?;
        Ok(Arc::clone(self.catalog.get_or_init(|| catalog)))
    }

    pub fn set_up(&self) -> Result<()> {
        Ok(())
    }

    /// Remove the data directory and everything in it
    pub fn tear_down(&self) -> Result<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
            tracing::debug!("Removed fixture root {}", self.root.display());
        }
        Ok(())
    }

    pub fn data_directory_root(&self) -> &Path {
        &self.root
    }

    pub fn is_test_data_available(&self) -> bool {
        true
    }
}

impl fmt::Debug for MockTestData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTestData")
            .field("root", &self.root)
            .field("include_raster", &self.is_include_raster())
            .field("mock_creator", &self.mock_creator)
            .field("built", &self.catalog.get().is_some())
            .finish()
    }
}
