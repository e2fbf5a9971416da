//! In-memory file system for deterministic tests.

use super::FileSystem;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A [`FileSystem`] holding files in a map. Paths are matched exactly.
#[derive(Debug, Clone, Default)]
pub struct MemFileSystem {
    files: BTreeMap<PathBuf, String>,
}

impl MemFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

impl FileSystem for MemFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| format!("cannot read {}: no such file", path.display()))
    }
}
