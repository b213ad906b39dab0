//! End-to-end tests of the CITE mock catalog

use std::collections::HashSet;
use std::sync::Arc;

use geocat_core::builder::CatalogBuilder;
use geocat_core::config::{ConfigOverrides, FixtureConfig};
use geocat_core::formats::FormatRegistry;
use geocat_core::models::{
    CatalogInfo, LayerType, ProjectionPolicy, QualifiedName, ReferencedEnvelope, ResourceInfo,
    ResourceKind, StoreInfo, StoreKind,
};
use geocat_core::ports::Catalog;
use geocat_core::GeocatError;
use geocat_testdata::cite::{self, CITE_PREFIX, CITE_TYPENAMES, CITE_URI};
use geocat_testdata::{MockCatalog, MockTestData};
use proptest::prelude::*;
use proptest::test_runner::TestRunner;
use tempfile::TempDir;

struct Fixture {
    _parent: TempDir,
    data: MockTestData,
    catalog: Arc<MockCatalog>,
}

fn fixture(include_raster: bool) -> Fixture {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let parent = TempDir::new().unwrap();
    let mut config = FixtureConfig::with_defaults();
    config.apply_overrides(ConfigOverrides {
        include_raster: Some(include_raster),
        parent_dir: Some(parent.path().to_path_buf()),
        ..Default::default()
    });

    let data = MockTestData::with_config(config).unwrap();
    let catalog = data.catalog().unwrap();
    Fixture { _parent: parent, data, catalog }
}

#[test]
fn test_workspace_by_name_and_id() {
    let f = fixture(false);

    let ws = f.catalog.get_workspace_by_name("cite").unwrap();
    let ns = f.catalog.get_namespace_by_prefix("cite").unwrap();
    assert_eq!(ns.uri, CITE_URI);
    assert!(Arc::ptr_eq(&f.catalog.get_workspace(&ws.id).unwrap(), &ws));
    assert!(Arc::ptr_eq(&f.catalog.get_namespace_by_uri(CITE_URI).unwrap(), &ns));
    assert!(Arc::ptr_eq(&f.catalog.get_namespace(&ns.id).unwrap(), &ns));
}

#[test]
fn test_feature_type_by_prefixed_and_qualified_name() {
    let f = fixture(false);

    let by_prefix = f.catalog.get_feature_type_by_name("cite:Buildings").unwrap();
    let by_uri = f
        .catalog
        .get_feature_type_by_qualified_name(&QualifiedName::new(CITE_URI, "Buildings"))
        .unwrap();

    assert!(Arc::ptr_eq(&by_prefix, &by_uri));
    assert_eq!(by_prefix.header.srs, "EPSG:4326");
    assert_eq!(by_prefix.header.lat_lon_bounding_box, ReferencedEnvelope::world());
    assert_eq!(by_prefix.header.native_bounding_box, None);
    assert_eq!(by_prefix.header.description, None);
    assert_eq!(by_prefix.header.projection_policy, ProjectionPolicy::None);
}

#[test]
fn test_utm_types_declare_their_srs() {
    let f = fixture(false);

    let lakes = f.catalog.get_feature_type_by_name("Lakes").unwrap();
    assert_eq!(lakes.header.srs, "EPSG:32615");
    assert_eq!(lakes.header.native_crs.epsg, 32615);
}

#[test]
fn test_feature_types_by_data_store_in_declaration_order() {
    let f = fixture(false);

    let store = f.catalog.get_data_store_by_name("cite").unwrap();
    let names: Vec<String> =
        f.catalog.get_feature_types_by_data_store(&store).iter().map(|ft| ft.header.name.clone()).collect();
    assert_eq!(names, CITE_TYPENAMES);
}

#[test]
fn test_defaults_are_first_workspace() {
    let f = fixture(false);

    let ws = f.catalog.get_default_workspace().unwrap();
    let ns = f.catalog.get_default_namespace().unwrap();
    assert_eq!(ws.name, cite::DEFAULT_PREFIX);
    assert_eq!(ns.prefix, ws.name);
    assert_eq!(ns.uri, cite::DEFAULT_URI);
    assert!(Arc::ptr_eq(&f.catalog.get_workspaces()[0], &ws));
}

#[test]
fn test_every_resolution_shape_agrees() {
    let f = fixture(true);

    for resource in f.catalog.get_resources(ResourceKind::Any) {
        let kind = resource.kind();
        let name = resource.name();
        let ns = Arc::clone(resource.namespace());
        let store = resource.store();

        let lookups = [
            f.catalog.get_resource(resource.id(), kind),
            f.catalog.get_resource_by_name(name, kind),
            f.catalog.get_resource_by_name(&format!("{}:{}", ns.prefix, name), kind),
            f.catalog.get_resource_by_qualified_name(&QualifiedName::new(ns.prefix.clone(), name), kind),
            f.catalog.get_resource_by_qualified_name(&QualifiedName::new(ns.uri.clone(), name), kind),
            f.catalog.get_resource_by_qualified_name(&QualifiedName::local(name), kind),
            f.catalog.get_resource_by_namespace(&ns, name, kind),
            f.catalog.get_resource_by_prefix(&ns.prefix, name, kind),
            f.catalog.get_resource_by_store(&store, name, kind),
            f.catalog.get_resource(resource.id(), ResourceKind::Any),
        ];

        for found in lookups {
            let found = found.unwrap_or_else(|| panic!("{} not resolved", name));
            assert_eq!(found.id(), resource.id());
        }
    }
}

#[test]
fn test_typed_lookups_respect_kind() {
    let f = fixture(true);

    assert!(f.catalog.get_coverage_by_name("Buildings").is_none());
    assert!(f.catalog.get_feature_type_by_name("DEM").is_none());
    assert!(f.catalog.get_data_store_by_name("DEM").is_none());
    assert!(f.catalog.get_coverage_store_by_name("cite").is_none());
    assert!(f.catalog.get_coverage_by_prefix("wcs", "DEM").is_some());
}

#[test]
fn test_stores_by_workspace() {
    let f = fixture(true);

    for ws in f.catalog.get_workspaces() {
        let data = f.catalog.get_stores_by_workspace(&ws.name, StoreKind::Data);
        let coverage = f.catalog.get_stores_by_workspace(&ws.name, StoreKind::Coverage);
        let all = f.catalog.get_stores_by_workspace(&ws.name, StoreKind::Any);

        let union: Vec<&str> = data.iter().chain(coverage.iter()).map(StoreInfo::id).collect();
        let generic: Vec<&str> = all.iter().map(StoreInfo::id).collect();
        assert_eq!(union, generic, "{}", ws.name);
        assert!(all.iter().all(|s| s.workspace().name == ws.name));
    }

    let wcs = f.catalog.get_workspace_by_name("wcs").unwrap();
    let names: Vec<String> =
        f.catalog.get_coverage_stores_by_workspace(&wcs).iter().map(|s| s.name.clone()).collect();
    assert_eq!(names, vec!["BlueMarble", "DEM", "World"]);
}

#[test]
fn test_resources_by_namespace() {
    let f = fixture(true);

    for ns in f.catalog.get_namespaces() {
        let feature_types = f.catalog.get_resources_by_namespace(&ns, ResourceKind::FeatureType);
        let coverages = f.catalog.get_resources_by_namespace(&ns, ResourceKind::Coverage);
        let all = f.catalog.get_resources_by_namespace(&ns, ResourceKind::Any);

        let expected: Vec<&str> = feature_types.iter().chain(coverages.iter()).map(ResourceInfo::id).collect();
        let actual: Vec<&str> = all.iter().map(ResourceInfo::id).collect();
        assert_eq!(expected, actual);
        assert!(all.iter().all(|r| r.namespace().id == ns.id));
    }

    let sf = f.catalog.get_namespace_by_prefix("sf").unwrap();
    assert_eq!(f.catalog.get_feature_types_by_namespace(&sf).len(), cite::SF_TYPENAMES.len());
}

#[test]
fn test_unprogrammed_lookups_are_empty() {
    let f = fixture(false);

    assert!(f.catalog.get_workspace_by_name("topp").is_none());
    assert!(f.catalog.get_feature_type_by_name("nowhere:Lakes").is_none());
    assert!(f.catalog.get_stores_by_workspace("gs", StoreKind::Any).is_empty());
    assert!(f.catalog.get_coverages().is_empty());
    assert!(f.catalog.get_style_by_name("raster").is_none());
}

#[test]
fn test_backing_files_exist() {
    let f = fixture(true);

    for store in f.catalog.get_data_stores() {
        let directory = store.directory().unwrap();
        assert!(directory.is_dir());
        for ft in f.catalog.get_feature_types_by_data_store(&store) {
            assert!(directory.join(format!("{}.properties", ft.header.name)).is_file());
        }
    }

    for store in f.catalog.get_coverage_stores() {
        assert!(store.file_path().unwrap().is_file(), "{}", store.url);
    }
}

#[test]
fn test_feature_sources_open_their_schema() {
    let f = fixture(false);

    for ft in f.catalog.get_feature_types() {
        let schema = ft.feature_type().unwrap();
        assert_eq!(schema.local_name(), ft.header.name.as_str());

        let source = ft.feature_source().unwrap();
        assert_eq!(source.schema.local_name(), ft.header.name.as_str());
        assert!(source.count().is_ok());
    }
}

#[test]
fn test_coverage_store_url_under_parent_with_space() {
    let parent = TempDir::new().unwrap();
    let parent_dir = parent.path().join("dir with space");
    let mut config = FixtureConfig::with_defaults();
    config.apply_overrides(ConfigOverrides {
        include_raster: Some(true),
        parent_dir: Some(parent_dir),
        ..Default::default()
    });
    let data = MockTestData::with_config(config).unwrap();
    let catalog = data.catalog().unwrap();

    let wcs = catalog.get_workspace_by_name("wcs").unwrap();
    let store = catalog.get_coverage_store_by_workspace(&wcs, "DEM").unwrap();

    assert!(store.url.starts_with("file:///"));
    assert!(!store.url.contains(' '), "{}", store.url);
    assert!(store.url.contains("dir%20with%20space"));
    let path = store.file_path().unwrap();
    assert_eq!(path, data.data_directory_root().join("DEM").join("tazdem.asc"));
    assert!(path.is_file());
}

#[test]
fn test_coverage_store_points_at_copied_raster() {
    let f = fixture(true);

    let wcs = f.catalog.get_workspace_by_name("wcs").unwrap();
    let store = f.catalog.get_coverage_store_by_workspace(&wcs, "DEM").unwrap();
    let path = f.data.data_directory_root().join("DEM").join("tazdem.asc");

    assert_eq!(store.file_path(), Some(path.clone()));
    let probed = FormatRegistry::with_defaults().find_format(&path).unwrap();
    assert_eq!(store.format().unwrap().name(), probed.name());
    assert_eq!(store.type_name().unwrap(), "ArcGrid");
}

#[test]
fn test_coverage_metadata_matches_catalog_builder() {
    let f = fixture(true);

    for coverage in f.catalog.get_coverages() {
        let reader = coverage.grid_coverage_reader().unwrap();
        let expected = CatalogBuilder::new().build_coverage(&coverage.store.name, reader.as_ref()).unwrap();

        assert_eq!(coverage.header.projection_policy, expected.projection_policy);
        assert_eq!(coverage.header.native_bounding_box.as_ref(), Some(&expected.native_bounding_box));
        assert_eq!(coverage.header.lat_lon_bounding_box, expected.lat_lon_bounding_box);
        assert_eq!(coverage.dimensions, expected.dimensions);
        assert_eq!(coverage.grid, expected.grid);
        assert_eq!(coverage.interpolation_methods, expected.interpolation_methods);
    }
}

#[test]
fn test_layers_and_styles() {
    let f = fixture(true);

    let lakes = f.catalog.get_layer_by_name("cite:Lakes").unwrap();
    assert_eq!(lakes.layer_type, LayerType::Vector);
    assert_eq!(lakes.default_style.name, "Lakes");
    let sld = lakes.default_style.style().unwrap();
    assert_eq!(sld.layers[0].name.as_deref(), Some("Lakes"));

    let points = f.catalog.get_layer_by_qualified_name(&QualifiedName::new(cite::CGF_URI, "Points")).unwrap();
    assert_eq!(points.default_style.name, cite::DEFAULT_VECTOR_STYLE);

    let dem = f.catalog.get_layer_by_name("DEM").unwrap();
    assert_eq!(dem.layer_type, LayerType::Raster);
    assert_eq!(dem.default_style.name, cite::DEFAULT_RASTER_STYLE);

    let styles: Vec<String> = f.catalog.get_styles().iter().map(|s| s.name.clone()).collect();
    assert_eq!(styles.first().map(String::as_str), Some(cite::DEFAULT_VECTOR_STYLE));
    assert_eq!(styles.last().map(String::as_str), Some(cite::DEFAULT_RASTER_STYLE));

    let unique: HashSet<&String> = styles.iter().collect();
    assert_eq!(unique.len(), styles.len());
    assert_eq!(f.catalog.get_layers().len(), f.catalog.get_resources(ResourceKind::Any).len());
}

#[test]
fn test_catalog_is_read_only() {
    let f = fixture(false);

    let ws = f.catalog.get_default_workspace().unwrap();
    let err = f.catalog.add(CatalogInfo::Workspace(ws)).unwrap_err();
    assert!(matches!(err, GeocatError::ReadOnlyCatalog { .. }));

    let lakes = f.catalog.get_feature_type_by_name("Lakes").unwrap();
    assert!(f.catalog.remove(CatalogInfo::Resource(ResourceInfo::FeatureType(lakes))).is_err());
    assert_eq!(f.catalog.data_directory().as_deref(), Some(f.data.data_directory_root()));
}

#[test]
fn test_tear_down_removes_root() {
    let f = fixture(false);
    let root = f.data.data_directory_root().to_path_buf();
    assert!(root.join("cite").join("Lakes.properties").is_file());

    f.data.tear_down().unwrap();
    assert!(!root.exists());
}

#[test]
fn test_name_lookup_matches_exactly_the_declared_types() {
    let f = fixture(false);
    let declared: HashSet<&str> = CITE_TYPENAMES.iter().copied().collect();

    let mut runner = TestRunner::default();
    runner
        .run(&"[A-Za-z]{1,14}", |name| {
            let found = f.catalog.get_feature_type_by_prefix(CITE_PREFIX, &name);
            prop_assert_eq!(found.is_some(), declared.contains(name.as_str()));
            if let Some(ft) = found {
                prop_assert_eq!(&ft.header.name, &name);
            }
            Ok(())
        })
        .unwrap();

    for name in CITE_TYPENAMES {
        assert!(f.catalog.get_feature_type_by_prefix(CITE_PREFIX, &name.to_uppercase()).is_none());
    }
}
