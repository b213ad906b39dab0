//! Build command implementation

use super::{cleanup, open_fixture};
use crate::cli::BuildArgs;
use crate::output::OutputWriter;
use crate::output_types::{BuildOutput, ResourceEntry, StoreEntry, WorkspaceEntry};
use anyhow::{Context, Result};
use geocat_core::config::FixtureConfig;
use geocat_core::models::{ResourceInfo, ResourceKind, StoreInfo, StoreKind};
use geocat_core::ports::Catalog;
use geocat_testdata::MockCatalog;
use tabled::Tabled;

pub fn execute(args: BuildArgs, config: FixtureConfig, output: &OutputWriter) -> Result<()> {
    let data = open_fixture(config)?;
    let catalog = data.catalog().context("Failed to build mock catalog")?;

    let result = BuildOutput {
        root: data.data_directory_root().display().to_string(),
        kept: args.fixture.keep,
        workspaces: workspaces(&catalog),
        stores: catalog.get_stores(StoreKind::Any).iter().map(store_entry).collect(),
        resources: catalog
            .get_resources(ResourceKind::Any)
            .iter()
            .map(|r| resource_entry(&catalog, r))
            .collect(),
        styles: catalog.get_styles().iter().map(|s| s.name.clone()).collect(),
    };

    if output.is_json() {
        output.result(&result)?;
    } else {
        print_inventory(&result, output);
        output.success(format!(
            "Built {} workspaces, {} stores and {} resources in {}",
            result.workspaces.len(),
            result.stores.len(),
            result.resources.len(),
            result.root
        ));
    }

    cleanup(&data, args.fixture.keep, Some(output));
    Ok(())
}

fn workspaces(catalog: &MockCatalog) -> Vec<WorkspaceEntry> {
    let default = catalog.get_default_workspace();
    catalog
        .get_workspaces()
        .iter()
        .map(|ws| WorkspaceEntry {
            name: ws.name.clone(),
            uri: catalog.get_namespace_by_prefix(&ws.name).map(|ns| ns.uri.clone()).unwrap_or_default(),
            is_default: default.as_ref().is_some_and(|d| d.id == ws.id),
        })
        .collect()
}

fn store_entry(store: &StoreInfo) -> StoreEntry {
    let location = match store {
        StoreInfo::Data(ds) => ds.directory().map(|d| d.display().to_string()).unwrap_or_default(),
        StoreInfo::Coverage(cs) => cs.url.clone(),
    };

    StoreEntry {
        workspace: store.workspace().name.clone(),
        name: store.name().to_string(),
        kind: format!("{:?}", store.kind()),
        location,
    }
}

fn resource_entry(catalog: &MockCatalog, resource: &ResourceInfo) -> ResourceEntry {
    let header = resource.header();
    ResourceEntry {
        name: header.prefixed_name(),
        kind: format!("{:?}", resource.kind()),
        store: resource.store().name().to_string(),
        srs: header.srs.clone(),
        style: catalog
            .get_layer_by_name(&header.prefixed_name())
            .map(|layer| layer.default_style.name.clone()),
    }
}

fn print_inventory(result: &BuildOutput, output: &OutputWriter) {
    #[derive(Tabled)]
    struct WorkspaceRow {
        #[tabled(rename = "Workspace")]
        name: String,
        #[tabled(rename = "Namespace URI")]
        uri: String,
        #[tabled(rename = "Default")]
        default: String,
    }

    #[derive(Tabled)]
    struct StoreRow {
        #[tabled(rename = "Workspace")]
        workspace: String,
        #[tabled(rename = "Store")]
        name: String,
        #[tabled(rename = "Kind")]
        kind: String,
        #[tabled(rename = "Location")]
        location: String,
    }

    #[derive(Tabled)]
    struct ResourceRow {
        #[tabled(rename = "Resource")]
        name: String,
        #[tabled(rename = "Kind")]
        kind: String,
        #[tabled(rename = "Store")]
        store: String,
        #[tabled(rename = "SRS")]
        srs: String,
        #[tabled(rename = "Style")]
        style: String,
    }

    output.kv("Data directory", &result.root);

    output.section("Workspaces");
    output.table(
        result
            .workspaces
            .iter()
            .map(|w| WorkspaceRow {
                name: w.name.clone(),
                uri: w.uri.clone(),
                default: if w.is_default { "yes".to_string() } else { String::new() },
            })
            .collect(),
    );

    output.section("Stores");
    output.table(
        result
            .stores
            .iter()
            .map(|s| StoreRow {
                workspace: s.workspace.clone(),
                name: s.name.clone(),
                kind: s.kind.clone(),
                location: s.location.clone(),
            })
            .collect(),
    );

    output.section("Resources");
    output.table(
        result
            .resources
            .iter()
            .map(|r| ResourceRow {
                name: r.name.clone(),
                kind: r.kind.clone(),
                store: r.store.clone(),
                srs: r.srs.clone(),
                style: r.style.clone().unwrap_or_else(|| "-".to_string()),
            })
            .collect(),
    );

    output.section("Styles");
    output.info(result.styles.join(", "));
}
