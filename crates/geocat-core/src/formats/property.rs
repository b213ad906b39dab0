//! Property file data store
//!
//! A directory holding one `<TypeName>.properties` file per feature type. The
//! first line declares the schema, every other line is one feature:
//!
//! ```text
//! _=the_geom:MultiPolygon:srid=4326,FID:String,ADDRESS:String
//! Buildings.1107531701010=MULTIPOLYGON(((0.0008 0.0005, ...)))|113|123 Main Street
//! ```

use geo::BoundingRect;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wkt::TryFromWkt;

use crate::error::{GeocatError, Result};
use crate::formats::FeatureDataAccess;
use crate::models::{Crs, QualifiedName, ReferencedEnvelope};
use crate::referencing;

const EXTENSION: &str = "properties";
const FORMAT_NAME: &str = "Property";
const NULL_TOKEN: &str = "<null>";

/// Java-style attribute type declared in a property file header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeBinding {
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    String,
    Date,
    /// Geometry attribute, with the declared geometry type name (e.g., "MultiPolygon")
    Geometry(String),
}

impl AttributeBinding {
    fn parse(type_name: &str) -> Result<Self> {
        let binding = match type_name {
            "Integer" | "int" => AttributeBinding::Integer,
            "Long" | "long" => AttributeBinding::Long,
            "Float" | "float" => AttributeBinding::Float,
            "Double" | "double" => AttributeBinding::Double,
            "Boolean" | "boolean" => AttributeBinding::Boolean,
            "String" | "" => AttributeBinding::String,
            "Date" | "Timestamp" => AttributeBinding::Date,
            "Geometry" | "Point" | "LineString" | "Polygon" | "MultiPoint" | "MultiLineString"
            | "MultiPolygon" | "GeometryCollection" => {
                AttributeBinding::Geometry(type_name.to_string())
            }
            other => {
                return Err(GeocatError::Format {
                    format: FORMAT_NAME.to_string(),
                    reason: format!("Unsupported attribute type {}", other),
                })
            }
        };
        Ok(binding)
    }

    pub fn is_geometry(&self) -> bool {
        matches!(self, AttributeBinding::Geometry(_))
    }
}

/// One attribute of a feature schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub name: String,
    pub binding: AttributeBinding,
    /// EPSG code of geometry attributes, when declared
    pub srid: Option<u32>,
}

/// Schema of a feature type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    /// Name qualified with the namespace URI of the data store
    pub name: QualifiedName,
    pub attributes: Vec<AttributeDescriptor>,
}

impl FeatureSchema {
    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    /// First geometry attribute
    pub fn geometry_descriptor(&self) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.binding.is_geometry())
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Parse the `_=name:Type[:srid=N],...` header line
    fn parse(name: QualifiedName, header: &str) -> Result<Self> {
        let columns = header.strip_prefix("_=").ok_or_else(|| GeocatError::Format {
            format: FORMAT_NAME.to_string(),
            reason: format!("{}: header must start with '_='", name),
        })?;

        let attributes = columns
            .split(',')
            .filter(|a| !a.trim().is_empty())
            .map(|attribute| {
                let mut parts = attribute.trim().split(':');
                let attr_name = parts.next().unwrap_or_default().to_string();
                let binding = AttributeBinding::parse(parts.next().unwrap_or_default())?;
                let srid = parts
                    .find_map(|hint| hint.strip_prefix("srid="))
                    .and_then(|code| code.parse::<u32>().ok());
                Ok(AttributeDescriptor { name: attr_name, binding, srid })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { name, attributes })
    }
}

/// A single feature read from a property file
#[derive(Debug, Clone)]
pub struct Feature {
    pub id: String,
    pub geometry: Option<geo::Geometry<f64>>,
    pub properties: HashMap<String, Value>,
}

/// Read access to the features of one property file
#[derive(Debug, Clone)]
pub struct FeatureSource {
    pub schema: Arc<FeatureSchema>,
    pub path: PathBuf,
}

impl FeatureSource {
    /// Read every feature of the file
    pub fn features(&self) -> Result<Vec<Feature>> {
        let content = fs::read_to_string(&self.path)?;
        content
            .lines()
            .skip(1)
            .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
            .map(|line| self.parse_feature(line))
            .collect()
    }

    /// Number of features in the file
    pub fn count(&self) -> Result<usize> {
        Ok(self.features()?.len())
    }

    /// Bounds of all feature geometries, in the CRS of the geometry attribute
    pub fn bounds(&self) -> Result<Option<ReferencedEnvelope>> {
        let crs = match self.schema.geometry_descriptor().and_then(|g| g.srid) {
            Some(code) => referencing::decode(code)?,
            None => Crs::wgs84(),
        };

        let bounds = self
            .features()?
            .iter()
            .filter_map(|f| f.geometry.as_ref().and_then(|g| g.bounding_rect()))
            .fold(None, |acc: Option<(f64, f64, f64, f64)>, rect| {
                let (min, max) = (rect.min(), rect.max());
                Some(match acc {
                    None => (min.x, min.y, max.x, max.y),
                    Some((x0, y0, x1, y1)) => (x0.min(min.x), y0.min(min.y), x1.max(max.x), y1.max(max.y)),
                })
            });

        Ok(bounds.map(|(x0, y0, x1, y1)| ReferencedEnvelope::new(x0, y0, x1, y1, crs)))
    }

    fn parse_feature(&self, line: &str) -> Result<Feature> {
        let (id, values) = line.split_once('=').ok_or_else(|| GeocatError::Format {
            format: FORMAT_NAME.to_string(),
            reason: format!("{}: feature line without '='", self.schema.name),
        })?;

        let values: Vec<&str> = values.split('|').collect();
        if values.len() != self.schema.attributes.len() {
            return Err(GeocatError::Format {
                format: FORMAT_NAME.to_string(),
                reason: format!(
                    "{}: feature {} has {} values, schema declares {}",
                    self.schema.name,
                    id,
                    values.len(),
                    self.schema.attributes.len()
                ),
            });
        }

        let mut geometry = None;
        let mut properties = HashMap::new();
        for (descriptor, raw) in self.schema.attributes.iter().zip(values) {
            if raw == NULL_TOKEN {
                properties.insert(descriptor.name.clone(), Value::Null);
                continue;
            }
            match &descriptor.binding {
                AttributeBinding::Geometry(_) => {
                    let parsed = geo::Geometry::<f64>::try_from_wkt_str(raw).map_err(|e| {
                        GeocatError::Format {
                            format: FORMAT_NAME.to_string(),
                            reason: format!("{}: invalid WKT in feature {}: {}", self.schema.name, id, e),
                        }
                    })?;
                    if geometry.is_none() {
                        geometry = Some(parsed);
                    }
                }
                binding => {
                    properties.insert(descriptor.name.clone(), parse_value(binding, raw));
                }
            }
        }

        Ok(Feature { id: id.to_string(), geometry, properties })
    }
}

/// Convert a raw value to JSON, keeping the raw string when it does not parse
fn parse_value(binding: &AttributeBinding, raw: &str) -> Value {
    let parsed = match binding {
        AttributeBinding::Integer | AttributeBinding::Long => raw.parse::<i64>().ok().map(Value::from),
        AttributeBinding::Float | AttributeBinding::Double => raw.parse::<f64>().ok().map(Value::from),
        AttributeBinding::Boolean => raw.parse::<bool>().ok().map(Value::from),
        _ => None,
    };
    parsed.unwrap_or_else(|| Value::String(raw.to_string()))
}

/// Data store over a directory of property files
#[derive(Debug, Clone)]
pub struct PropertyDataStore {
    directory: PathBuf,
    namespace_uri: Option<String>,
}

impl PropertyDataStore {
    /// Open a data store over `directory`; schemas are qualified with `namespace_uri`
    pub fn new(directory: impl Into<PathBuf>, namespace_uri: Option<String>) -> Self {
        Self { directory: directory.into(), namespace_uri }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace_uri.as_deref()
    }

    fn file_for(&self, name: &str) -> Result<PathBuf> {
        let path = self.directory.join(format!("{}.{}", name, EXTENSION));
        if !path.is_file() {
            return Err(GeocatError::SchemaNotFound { name: name.to_string() });
        }
        Ok(path)
    }

    fn qualify(&self, name: &str) -> QualifiedName {
        match &self.namespace_uri {
            Some(uri) => QualifiedName::new(uri.clone(), name),
            None => QualifiedName::local(name),
        }
    }
}

impl FeatureDataAccess for PropertyDataStore {
    fn type_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = fs::read_dir(&self.directory)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(EXTENSION))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        names.sort();
        Ok(names)
    }

    fn schema(&self, name: &str) -> Result<FeatureSchema> {
        let path = self.file_for(name)?;
        let content = fs::read_to_string(&path)?;
        let header = content.lines().next().unwrap_or_default();
        FeatureSchema::parse(self.qualify(name), header)
    }

    fn feature_source(&self, name: &str) -> Result<FeatureSource> {
        let schema = self.schema(name)?;
        Ok(FeatureSource { schema: Arc::new(schema), path: self.file_for(name)? })
    }
}
