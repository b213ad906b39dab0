use super::MetadataMap;

/// Administrative grouping of stores
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceInfo {
    pub id: String,
    pub name: String,
    pub metadata: MetadataMap,
}

/// XML namespace paired one-to-one with a workspace of the same name
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceInfo {
    pub id: String,
    /// Namespace prefix, always equal to the workspace name
    pub prefix: String,
    pub uri: String,
    pub metadata: MetadataMap,
}

impl NamespaceInfo {
    /// Namespaces are named after their prefix
    pub fn name(&self) -> &str {
        &self.prefix
    }
}
