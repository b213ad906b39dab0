//! Command implementations

mod build;
mod config;
mod lookup;

use crate::cli::{Cli, Commands, FixtureArgs};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use geocat_core::config::{ConfigOverrides, FixtureConfig};
use geocat_testdata::MockTestData;
use std::path::Path;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config_file = cli.config.as_deref();

    match cli.command {
        Commands::Build(args) => {
            let config = load_config(config_file, Some(&args.fixture))?;
            build::execute(args, config, &output)
        }
        Commands::Lookup(args) => {
            let config = load_config(config_file, Some(&args.fixture))?;
            lookup::execute(args, config, &output)
        }
        Commands::Config => config::execute(load_config(config_file, None)?, &output),
    }
}

/// Defaults, then the config file, then the environment, then command-line flags
fn load_config(file: Option<&Path>, fixture: Option<&FixtureArgs>) -> Result<FixtureConfig> {
    let mut config = FixtureConfig::with_defaults();
    if let Some(path) = file {
        config = config
            .load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
    }
    let mut config = config.load_from_env();

    if let Some(fixture) = fixture {
        config.apply_overrides(ConfigOverrides {
            include_raster: fixture.raster.then_some(true),
            parent_dir: fixture.parent_dir.clone(),
            srs_overrides: None,
        });
    }

    Ok(config)
}

/// Create the fixture and build its catalog
fn open_fixture(config: FixtureConfig) -> Result<MockTestData> {
    let data = MockTestData::with_config(config).context("Failed to create fixture directory")?;
    data.set_up().context("Failed to set up fixture")?;
    if let Err(e) = data.catalog() {
        cleanup(&data, false, None);
        return Err(e).context("Failed to build mock catalog");
    }
    Ok(data)
}

/// Remove the fixture directory unless asked to keep it
fn cleanup(data: &MockTestData, keep: bool, output: Option<&OutputWriter>) {
    if keep {
        if let Some(output) = output {
            output.info(format!("Fixture kept at {}", data.data_directory_root().display()));
        }
        return;
    }

    if let Err(e) = data.tear_down() {
        tracing::warn!("Failed to remove {}: {}", data.data_directory_root().display(), e);
        if let Some(output) = output {
            output.warning(format!("Fixture left at {}", data.data_directory_root().display()));
        }
    }
}
