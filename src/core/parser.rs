//! YAML settings parsing and validation.
//!
//! Parses revisa.yaml and per-assignment files and validates structural
//! constraints:
//! - Version must be "1.0"
//! - Tool paths must not be empty
//! - Contract names must not be empty

use super::types::{AssignmentSettings, SystemSettings};
use std::path::Path;

/// Settings validation error.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

fn err(message: String) -> ConfigError {
    ConfigError { message }
}

/// Parse a revisa.yaml file from disk.
pub fn parse_system_file(path: &Path) -> Result<SystemSettings, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_system(&content)
}

/// Parse system settings from a string.
pub fn parse_system(yaml: &str) -> Result<SystemSettings, String> {
    serde_yaml_ng::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))
}

/// Parse an assignment settings file from disk.
pub fn parse_assignment_file(path: &Path) -> Result<AssignmentSettings, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_assignment(&content)
}

/// Parse assignment settings from a string.
pub fn parse_assignment(yaml: &str) -> Result<AssignmentSettings, String> {
    serde_yaml_ng::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))
}

/// Validate parsed system settings. Returns a list of errors (empty = valid).
pub fn validate_system(settings: &SystemSettings) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if settings.version != "1.0" {
        errors.push(err(format!(
            "version must be \"1.0\", got \"{}\"",
            settings.version
        )));
    }

    if settings.name.is_empty() {
        errors.push(err("name must not be empty".to_string()));
    }

    if settings.compiler.is_empty() {
        errors.push(err("compiler path must not be empty".to_string()));
    }

    if settings.test_runner.is_empty() {
        errors.push(err("test_runner path must not be empty".to_string()));
    }

    if settings.work_dir.as_os_str().is_empty() {
        errors.push(err("work_dir must not be empty".to_string()));
    }

    errors
}

/// Validate parsed assignment settings.
pub fn validate_assignment(settings: &AssignmentSettings) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if settings.name.is_empty() {
        errors.push(err("assignment name must not be empty".to_string()));
    }

    if settings.class_to_implement.is_empty() {
        errors.push(err("class_to_implement must not be empty".to_string()));
    }

    if settings.interface_to_implement.is_empty() {
        errors.push(err("interface_to_implement must not be empty".to_string()));
    }

    errors
}
