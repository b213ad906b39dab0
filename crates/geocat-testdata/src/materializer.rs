//! Copies embedded resources into the fixture root, one directory per store

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use geocat_core::{GeocatError, Result};

use crate::resources::ResourceSource;

/// Writes fixture files below a root directory
#[derive(Clone)]
pub struct FixtureMaterializer {
    root: PathBuf,
    resources: Arc<dyn ResourceSource>,
}

impl FixtureMaterializer {
    pub fn new(root: impl Into<PathBuf>, resources: Arc<dyn ResourceSource>) -> Self {
        Self { root: root.into(), resources }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resources(&self) -> &dyn ResourceSource {
        self.resources.as_ref()
    }

    /// Create `<root>/<store>` if absent
    pub fn ensure_store_dir(&self, store: &str) -> Result<PathBuf> {
        let dir = self.root.join(store);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Copy the named resource to `destination`, overwriting it
    pub fn copy(&self, resource: &str, destination: &Path) -> Result<()> {
        let bytes = self
            .resources
            .open(resource)
            .ok_or_else(|| GeocatError::ResourceNotFound { name: resource.to_string() })?;

        fs::write(destination, bytes).map_err(|source| GeocatError::FixtureCopy {
            source_name: resource.to_string(),
            destination: destination.to_path_buf(),
            source,
        })?;

        tracing::debug!("Copied {} to {}", resource, destination.display());
        Ok(())
    }

    /// Copy the named resource into the directory of `store`
    pub fn copy_to_store(&self, store: &str, resource: &str) -> Result<PathBuf> {
        let destination = self.ensure_store_dir(store)?.join(resource);
        self.copy(resource, &destination)?;
        Ok(destination)
    }
}

impl std::fmt::Debug for FixtureMaterializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureMaterializer").field("root", &self.root).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{EmbeddedResources, MemoryResources};
    use tempfile::TempDir;

    #[test]
    fn test_copy_to_store() {
        let dir = TempDir::new().unwrap();
        let materializer = FixtureMaterializer::new(dir.path(), Arc::new(EmbeddedResources));

        let path = materializer.copy_to_store("cite", "Lakes.properties").unwrap();

        assert_eq!(path, dir.path().join("cite").join("Lakes.properties"));
        assert!(fs::read_to_string(&path).unwrap().starts_with("_=the_geom"));
    }

    #[test]
    fn test_copy_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut resources = MemoryResources::new();
        resources.insert("a.txt", "fresh");
        let materializer = FixtureMaterializer::new(dir.path(), Arc::new(resources));
        let destination = dir.path().join("a.txt");
        fs::write(&destination, "stale content").unwrap();

        materializer.copy("a.txt", &destination).unwrap();
        assert_eq!(fs::read_to_string(&destination).unwrap(), "fresh");
    }

    #[test]
    fn test_missing_resource_fails() {
        let dir = TempDir::new().unwrap();
        let materializer = FixtureMaterializer::new(dir.path(), Arc::new(MemoryResources::new()));

        let err = materializer.copy_to_store("cite", "Nope.properties").unwrap_err();
        assert!(matches!(err, GeocatError::ResourceNotFound { ref name } if name == "Nope.properties"));
    }

    #[test]
    fn test_copy_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let materializer = FixtureMaterializer::new(dir.path(), Arc::new(EmbeddedResources));

        let err = materializer
            .copy("Lakes.properties", &dir.path().join("absent").join("Lakes.properties"))
            .unwrap_err();
        assert!(matches!(err, GeocatError::FixtureCopy { .. }));
    }

    #[test]
    fn test_ensure_store_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let materializer = FixtureMaterializer::new(dir.path(), Arc::new(EmbeddedResources));
        let first = materializer.ensure_store_dir("DEM").unwrap();
        let second = materializer.ensure_store_dir("DEM").unwrap();
        assert_eq!(first, second);
        assert!(first.is_dir());
    }
}
