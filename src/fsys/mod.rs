//! File-system capability — injected so the pipeline can run against a
//! fake in tests.

pub mod mem;
pub mod os;

pub use mem::MemFileSystem;
pub use os::OsFileSystem;

use crate::core::types::ArtifactManifest;
use std::path::Path;

/// Read-only file access as the pipeline sees it.
pub trait FileSystem {
    /// Whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read a file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> Result<String, String>;

    /// Load an artifact type manifest (JSON).
    fn load_manifest(&self, path: &Path) -> Result<ArtifactManifest, String> {
        let content = self.read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| format!("invalid manifest {}: {}", path.display(), e))
    }

    /// Load a structured log (JSON tree).
    fn load_json(&self, path: &Path) -> Result<serde_json::Value, String> {
        let content = self.read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| format!("invalid JSON log {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_load_manifest_via_mem() {
        let mut fs = MemFileSystem::new();
        fs.insert(
            "/work/artifact.types.json",
            r#"{"types": [{"name": "BoundedStack", "implements": ["Stack"]}]}"#,
        );
        let manifest = fs
            .load_manifest(&PathBuf::from("/work/artifact.types.json"))
            .unwrap();
        assert_eq!(manifest.types[0].name, "BoundedStack");
    }

    #[test]
    fn test_load_manifest_invalid_json() {
        let mut fs = MemFileSystem::new();
        fs.insert("/work/artifact.types.json", "{broken");
        let result = fs.load_manifest(&PathBuf::from("/work/artifact.types.json"));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("invalid manifest"));
    }

    #[test]
    fn test_load_json_missing_file() {
        let fs = MemFileSystem::new();
        let result = fs.load_json(&PathBuf::from("/nowhere.json"));
        assert!(result.is_err());
    }
}
