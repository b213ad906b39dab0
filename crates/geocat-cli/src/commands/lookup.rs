//! Lookup command implementation

use super::{cleanup, open_fixture};
use crate::cli::{KindArg, LookupArgs};
use crate::output::OutputWriter;
use crate::output_types::{LookupOutput, LookupShape};
use anyhow::{Context, Result};
use geocat_core::config::FixtureConfig;
use geocat_core::models::{QualifiedName, ResourceInfo, ResourceKind};
use geocat_core::ports::Catalog;
use geocat_testdata::MockCatalog;
use tabled::Tabled;

pub fn execute(args: LookupArgs, config: FixtureConfig, output: &OutputWriter) -> Result<()> {
    let data = open_fixture(config)?;
    let catalog = data.catalog().context("Failed to build mock catalog")?;

    let kind = match args.kind {
        KindArg::Any => ResourceKind::Any,
        KindArg::FeatureType => ResourceKind::FeatureType,
        KindArg::Coverage => ResourceKind::Coverage,
    };
    let name = parse_name(&args.name);

    let mut shapes = vec![
        shape("by name", catalog.get_resource_by_name(&args.name, kind)),
        shape("by qualified name", catalog.get_resource_by_qualified_name(&name, kind)),
    ];

    let resolved = catalog
        .get_resource_by_qualified_name(&name, kind)
        .or_else(|| catalog.get_resource_by_name(&args.name, kind));
    if let Some(resource) = &resolved {
        shapes.extend(resolution_shapes(&catalog, resource, kind));
    }

    let result = LookupOutput {
        name: args.name.clone(),
        resolved: resolved.as_ref().map(|r| r.header().prefixed_name()),
        shapes,
    };

    if output.is_json() {
        output.result(&result)?;
    } else {
        print_shapes(&result, output);
    }

    cleanup(&data, args.fixture.keep, Some(output));
    Ok(())
}

/// `{uri}local`, `prefix:local` or a bare local name
fn parse_name(name: &str) -> QualifiedName {
    if let Some(rest) = name.strip_prefix('{') {
        if let Some((uri, local)) = rest.split_once('}') {
            return QualifiedName::new(uri, local);
        }
    }
    QualifiedName::parse(name)
}

fn shape(label: &str, found: Option<ResourceInfo>) -> LookupShape {
    LookupShape { shape: label.to_string(), id: found.map(|r| r.id().to_string()) }
}

/// Every other lookup that should find the resolved resource
fn resolution_shapes(catalog: &MockCatalog, resource: &ResourceInfo, kind: ResourceKind) -> Vec<LookupShape> {
    let local = resource.name();
    let ns = resource.namespace();

    vec![
        shape("by id", catalog.get_resource(resource.id(), kind)),
        shape("by local name", catalog.get_resource_by_name(local, kind)),
        shape("by prefixed name", catalog.get_resource_by_name(&resource.header().prefixed_name(), kind)),
        shape("by (prefix, local)", catalog.get_resource_by_prefix(&ns.prefix, local, kind)),
        shape("by (uri, local)", catalog.get_resource_by_qualified_name(&resource.header().qualified_name(), kind)),
        shape("by namespace", catalog.get_resource_by_namespace(ns, local, kind)),
        shape("by store", catalog.get_resource_by_store(&resource.store(), local, kind)),
    ]
}

fn print_shapes(result: &LookupOutput, output: &OutputWriter) {
    #[derive(Tabled)]
    struct ShapeRow {
        #[tabled(rename = "Lookup")]
        shape: String,
        #[tabled(rename = "Id")]
        id: String,
    }

    match &result.resolved {
        Some(name) => output.kv("Resolved", name),
        None => output.warning(format!("{} does not resolve", result.name)),
    }

    output.table(
        result
            .shapes
            .iter()
            .map(|s| ShapeRow { shape: s.shape.clone(), id: s.id.clone().unwrap_or_else(|| "-".to_string()) })
            .collect(),
    );
}
