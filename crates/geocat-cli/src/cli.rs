use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// geocat - Mock geospatial catalog fixture
#[derive(Parser, Debug)]
#[command(name = "geocat")]
#[command(about = "Build and inspect the CITE mock catalog fixture", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the fixture and list its contents
    Build(BuildArgs),

    /// Resolve a resource name through every lookup shape
    Lookup(LookupArgs),

    /// Show the effective configuration and where each value came from
    Config,
}

/// Options shared by commands that build the fixture
#[derive(clap::Args, Debug)]
pub struct FixtureArgs {
    /// Include the raster style and the wcs coverages
    #[arg(long)]
    pub raster: bool,

    /// Directory in which the fixture root is created
    #[arg(long, value_name = "DIR")]
    pub parent_dir: Option<PathBuf>,

    /// Keep the fixture directory instead of removing it on exit
    #[arg(long)]
    pub keep: bool,
}

#[derive(Parser, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub fixture: FixtureArgs,
}

#[derive(Parser, Debug)]
pub struct LookupArgs {
    /// Local name, `prefix:local` or `{uri}local`
    pub name: String,

    /// Resource kind to look up
    #[arg(long, default_value = "any")]
    pub kind: KindArg,

    #[command(flatten)]
    pub fixture: FixtureArgs,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum KindArg {
    Any,
    FeatureType,
    Coverage,
}
