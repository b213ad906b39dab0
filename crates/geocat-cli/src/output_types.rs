use serde::Serialize;

/// Output for build command
#[derive(Debug, Serialize)]
pub struct BuildOutput {
    pub root: String,
    pub kept: bool,
    pub workspaces: Vec<WorkspaceEntry>,
    pub stores: Vec<StoreEntry>,
    pub resources: Vec<ResourceEntry>,
    pub styles: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct WorkspaceEntry {
    pub name: String,
    pub uri: String,
    pub is_default: bool,
}

#[derive(Debug, Serialize)]
pub struct StoreEntry {
    pub workspace: String,
    pub name: String,
    pub kind: String,
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct ResourceEntry {
    pub name: String,
    pub kind: String,
    pub store: String,
    pub srs: String,
    pub style: Option<String>,
}

/// Output for lookup command
#[derive(Debug, Serialize)]
pub struct LookupOutput {
    pub name: String,
    pub resolved: Option<String>,
    pub shapes: Vec<LookupShape>,
}

#[derive(Debug, Serialize)]
pub struct LookupShape {
    pub shape: String,
    pub id: Option<String>,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub values: Vec<ConfigEntry>,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub source: String,
}
