use crate::error::{GeocatError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable toggling the raster workspace
pub const ENV_INCLUDE_RASTER: &str = "GEOCAT_INCLUDE_RASTER";

/// Environment variable naming the directory fixture roots are created in
pub const ENV_PARENT_DIR: &str = "GEOCAT_PARENT_DIR";

/// Where a configuration value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Set programmatically by the caller
    Override,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Override => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has equal or higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() >= self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration of the catalog fixture
#[derive(Debug, Clone)]
pub struct FixtureConfig {
    /// Emit the raster style, the `wcs` workspace and its coverages
    pub include_raster: ConfigValue<bool>,
    /// Directory in which the random fixture root is created
    pub parent_dir: ConfigValue<PathBuf>,
    /// Feature type name to EPSG code; types not listed use EPSG:4326
    pub srs_overrides: ConfigValue<BTreeMap<String, u32>>,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FixtureConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            include_raster: ConfigValue::new(false, ConfigSource::Default),
            parent_dir: ConfigValue::new(env::temp_dir(), ConfigSource::Default),
            srs_overrides: ConfigValue::new(BTreeMap::new(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeocatError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeocatError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(include_raster) = file_config.include_raster {
            self.include_raster.update(include_raster, ConfigSource::File);
        }

        if let Some(parent_dir) = file_config.parent_dir {
            self.parent_dir.update(parent_dir, ConfigSource::File);
        }

        if let Some(srs_overrides) = file_config.srs_overrides {
            self.srs_overrides.update(srs_overrides, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(raster_str) = env::var(ENV_INCLUDE_RASTER) {
            match parse_bool(&raster_str) {
                Ok(include) => self.include_raster.update(include, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid {} value '{}': expected true or false",
                    ENV_INCLUDE_RASTER,
                    raster_str
                ),
            }
        }

        if let Ok(dir) = env::var(ENV_PARENT_DIR) {
            if dir.trim().is_empty() {
                tracing::warn!("Ignoring empty {}", ENV_PARENT_DIR);
            } else {
                self.parent_dir.update(PathBuf::from(dir), ConfigSource::Environment);
            }
        }

        self
    }

    /// Apply programmatic overrides
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(include_raster) = overrides.include_raster {
            self.include_raster.update(include_raster, ConfigSource::Override);
        }

        if let Some(parent_dir) = overrides.parent_dir {
            self.parent_dir.update(parent_dir, ConfigSource::Override);
        }

        if let Some(srs_overrides) = overrides.srs_overrides {
            self.srs_overrides.update(srs_overrides, ConfigSource::Override);
        }
    }

    /// EPSG code declared for a feature type
    pub fn srs_code(&self, type_name: &str) -> u32 {
        self.srs_overrides.value.get(type_name).copied().unwrap_or(4326)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "include_raster".to_string(),
            (self.include_raster.value.to_string(), self.include_raster.source),
        );

        map.insert(
            "parent_dir".to_string(),
            (self.parent_dir.value.display().to_string(), self.parent_dir.source),
        );

        let overrides = self
            .srs_overrides
            .value
            .iter()
            .map(|(name, code)| format!("{}=EPSG:{}", name, code))
            .collect::<Vec<_>>()
            .join(",");
        map.insert("srs_overrides".to_string(), (overrides, self.srs_overrides.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    include_raster: Option<bool>,
    parent_dir: Option<PathBuf>,
    srs_overrides: Option<BTreeMap<String, u32>>,
}

/// Programmatic configuration overrides
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub include_raster: Option<bool>,
    pub parent_dir: Option<PathBuf>,
    pub srs_overrides: Option<BTreeMap<String, u32>>,
}

/// Parse a boolean flag from string
pub fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(GeocatError::ConfigInvalid {
            key: "include_raster".to_string(),
            reason: format!("Invalid flag: {}. Use true or false", s),
        }),
    }
}
