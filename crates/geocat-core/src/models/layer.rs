use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ResourceInfo, StyleInfo};

/// Kind of data a layer publishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerType {
    Vector,
    Raster,
}

/// Published view of a resource with its default style
#[derive(Debug, Clone)]
pub struct LayerInfo {
    pub id: String,
    /// Always equal to the resource name
    pub name: String,
    pub layer_type: LayerType,
    pub resource: ResourceInfo,
    pub default_style: Arc<StyleInfo>,
    pub path: Option<String>,
    pub enabled: bool,
    pub advertised: bool,
}

impl LayerInfo {
    /// Name in `prefix:local` form
    pub fn prefixed_name(&self) -> String {
        format!("{}:{}", self.resource.namespace().prefix, self.name)
    }
}

impl PartialEq for LayerInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
