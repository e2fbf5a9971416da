//! Scripted runner for deterministic tests.

use super::CommandRunner;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A [`CommandRunner`] that returns preconfigured exit codes by script
/// path. Unknown scripts are an error, matching a missing executable.
#[derive(Debug, Clone, Default)]
pub struct StubRunner {
    codes: HashMap<PathBuf, i32>,
}

impl StubRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the exit code returned for `script`.
    pub fn on(mut self, script: impl Into<PathBuf>, code: i32) -> Self {
        self.codes.insert(script.into(), code);
        self
    }
}

impl CommandRunner for StubRunner {
    fn execute_sync(&self, script: &Path) -> Result<i32, String> {
        self.codes
            .get(script)
            .copied()
            .ok_or_else(|| format!("no such script: {}", script.display()))
    }
}
