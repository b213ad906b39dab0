//! Mock catalog fixture for geospatial server tests
//!
//! Builds a read-only [`MockCatalog`] over the CITE compliance data set and
//! materializes the backing property files and rasters in a scratch
//! directory, so tests of catalog-consuming code can run without a real
//! catalog.

pub mod answers;
pub mod builder;
pub mod cite;
pub mod factory;
pub mod ids;
pub mod materializer;
pub mod mock_catalog;
pub mod mock_test_data;
pub mod resources;

pub use builder::{CoverageStoreScope, DataStoreScope, MockCatalogBuilder, WorkspaceScope};
pub use mock_catalog::MockCatalog;
pub use mock_test_data::{CiteMockCreator, MockCreator, MockTestData};
pub use resources::{EmbeddedResources, MemoryResources, ResourceSource};
