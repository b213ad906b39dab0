use std::sync::Arc;

use super::{Lazy, WorkspaceInfo};
use crate::error::Result;
use crate::formats::sld::StyledLayerDescriptor;

/// Version string of SLD 1.0 documents
pub const SLD_10: &str = "1.0.0";

/// Styled layer descriptor document registered in the catalog
#[derive(Debug)]
pub struct StyleInfo {
    pub id: String,
    pub name: String,
    /// File name of the document, `<name>.sld`
    pub filename: String,
    pub sld_version: String,
    /// Owning workspace, `None` for global styles
    pub workspace: Option<Arc<WorkspaceInfo>>,
    /// Parsed document, built on demand
    pub style: Lazy<Arc<StyledLayerDescriptor>>,
}

impl StyleInfo {
    /// Parsed style tree
    pub fn style(&self) -> Result<Arc<StyledLayerDescriptor>> {
        self.style.get()
    }
}

impl PartialEq for StyleInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
