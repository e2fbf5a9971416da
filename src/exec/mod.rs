//! Command execution capability — synchronous, blocking.
//!
//! The pipeline only ever needs an exit code; tool diagnostics go to the
//! log files the generated scripts redirect into.

pub mod local;
pub mod stub;

pub use local::LocalRunner;
pub use stub::StubRunner;

use std::path::Path;

/// Executes a generated script and blocks until it terminates.
pub trait CommandRunner {
    fn execute_sync(&self, script: &Path) -> Result<i32, String>;
}
