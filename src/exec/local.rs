//! Local execution via `bash`.

use super::CommandRunner;
use std::path::Path;
use std::process::{Command, Stdio};

/// Runs scripts on the local machine.
/// Uses bash (not sh/dash) because generated scripts use `set -o pipefail`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalRunner;

impl CommandRunner for LocalRunner {
    fn execute_sync(&self, script: &Path) -> Result<i32, String> {
        let status = Command::new("bash")
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| format!("failed to spawn bash for {}: {}", script.display(), e))?;

        Ok(status.code().unwrap_or(-1))
    }
}
