//! Batch descriptor — per-submission paths and generated invocation
//! scripts.
//!
//! Derives where the build script, test script, logs, artifact and type
//! manifest live for one submission, and writes the two bash scripts that
//! invoke the configured tools. Tool arguments may reference `{{source}}`,
//! `{{artifact}}`, `{{manifest}}`, `{{tests}}` and `{{report}}`; unknown
//! placeholders are errors.

use super::types::{AssignmentSettings, SubmitSettings, SystemSettings};
use std::path::{Path, PathBuf};

/// The derived paths for one validation run. Opaque strings to the
/// pipeline; only the descriptor knows how they are laid out.
#[derive(Debug, Clone)]
pub struct BatchDescriptor {
    /// `{work_dir}/{submission_id}/`
    pub submit_dir: PathBuf,
    pub build_script: PathBuf,
    pub test_script: PathBuf,
    pub build_log: PathBuf,
    pub artifact: PathBuf,
    pub manifest: PathBuf,
    pub test_log: PathBuf,
}

impl BatchDescriptor {
    /// Derive the descriptor paths. Pure; nothing touches the disk.
    pub fn paths(sys: &SystemSettings, submit: &SubmitSettings) -> Self {
        let submit_dir = sys.work_dir.join(&submit.submission_id);
        Self {
            build_script: submit_dir.join("build.sh"),
            test_script: submit_dir.join("test.sh"),
            build_log: submit_dir.join("build.log"),
            artifact: submit_dir.join("artifact.bin"),
            manifest: submit_dir.join("artifact.types.json"),
            test_log: submit_dir.join("test-report.json"),
            submit_dir,
        }
    }

    /// Derive the paths, create the submission directory, and write both
    /// invocation scripts.
    pub fn prepare(
        sys: &SystemSettings,
        assignment: &AssignmentSettings,
        submit: &SubmitSettings,
    ) -> Result<Self, String> {
        let desc = Self::paths(sys, submit);
        std::fs::create_dir_all(&desc.submit_dir)
            .map_err(|e| format!("cannot create {}: {}", desc.submit_dir.display(), e))?;

        let build = desc.build_script_body(sys, submit)?;
        let test = desc.test_script_body(sys, assignment)?;
        write_script(&desc.build_script, &build)?;
        write_script(&desc.test_script, &test)?;

        Ok(desc)
    }

    /// Bash body for the build step. Tool stdout/stderr land in the
    /// build log; exit code is the tool's.
    fn build_script_body(
        &self,
        sys: &SystemSettings,
        submit: &SubmitSettings,
    ) -> Result<String, String> {
        let vars = [
            ("source", submit.source_dir.display().to_string()),
            ("artifact", self.artifact.display().to_string()),
            ("manifest", self.manifest.display().to_string()),
        ];
        let args = resolve_args(&sys.compiler_args, &vars)?;
        Ok(format!(
            "set -uo pipefail\n{} > '{}' 2>&1\n",
            command_line(&sys.compiler, &args),
            self.build_log.display()
        ))
    }

    /// Bash body for the test step. The runner's stdout is captured as
    /// the report; runners that write the report themselves receive the
    /// path via `{{report}}`.
    fn test_script_body(
        &self,
        sys: &SystemSettings,
        assignment: &AssignmentSettings,
    ) -> Result<String, String> {
        let tests = assignment
            .test_suite
            .as_ref()
            .map(|p| p.display().to_string());
        let mut vars = vec![
            ("artifact", self.artifact.display().to_string()),
            ("report", self.test_log.display().to_string()),
        ];
        if let Some(tests) = tests {
            vars.push(("tests", tests));
        }
        let args = resolve_args(&sys.test_runner_args, &vars)?;
        Ok(format!(
            "set -uo pipefail\n{} > '{}' 2>&1\n",
            command_line(&sys.test_runner, &args),
            self.test_log.display()
        ))
    }
}

fn write_script(path: &Path, body: &str) -> Result<(), String> {
    std::fs::write(path, body).map_err(|e| format!("cannot write {}: {}", path.display(), e))
}

fn command_line(tool: &str, args: &[String]) -> String {
    let mut line = format!("'{}'", tool);
    for arg in args {
        line.push_str(&format!(" '{}'", arg));
    }
    line
}

fn resolve_args(args: &[String], vars: &[(&str, String)]) -> Result<Vec<String>, String> {
    args.iter().map(|a| resolve_template(a, vars)).collect()
}

/// Resolve all `{{...}}` placeholders in a string.
fn resolve_template(template: &str, vars: &[(&str, String)]) -> Result<String, String> {
    let mut result = template.to_string();
    let mut start = 0;

    while let Some(open) = result[start..].find("{{") {
        let open = start + open;
        let close = result[open..]
            .find("}}")
            .ok_or_else(|| format!("unclosed placeholder in \"{}\"", template))?;
        let close = open + close + 2;
        let key = result[open + 2..close - 2].trim();

        let value = vars
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| format!("unknown placeholder: {}", key))?;

        result.replace_range(open..close, &value);
        start = open + value.len();
    }

    Ok(result)
}
