//! Settings, verdict, and manifest types.
//!
//! Defines the YAML schema types for system and assignment settings, the
//! per-submission settings, the verdict returned by the pipeline, and the
//! artifact type manifest consumed by the capability checker.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// Settings — revisa.yaml
// ============================================================================

/// Environment-level configuration, immutable for one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSettings {
    /// Schema version (must be "1.0")
    pub version: String,

    /// Human-readable grader name
    pub name: String,

    /// Path to the build tool binary
    pub compiler: String,

    /// Build tool arguments; `{{source}}`, `{{artifact}}` and
    /// `{{manifest}}` placeholders are resolved per submission
    #[serde(default)]
    pub compiler_args: Vec<String>,

    /// Path to the test runner binary
    pub test_runner: String,

    /// Test runner arguments; `{{artifact}}` and `{{tests}}` placeholders
    /// are resolved per submission
    #[serde(default)]
    pub test_runner_args: Vec<String>,

    /// Scratch root — scripts, logs and artifacts land under
    /// `{work_dir}/{submission_id}/`
    pub work_dir: PathBuf,
}

// ============================================================================
// Settings — per assignment
// ============================================================================

/// The structural contract a submission must satisfy, supplied per
/// assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentSettings {
    /// Assignment name
    pub name: String,

    /// Name of the type the submission must define
    pub class_to_implement: String,

    /// Name of the contract that type must implement
    pub interface_to_implement: String,

    /// Path to the assignment's test bundle, handed to the test runner
    #[serde(default)]
    pub test_suite: Option<PathBuf>,
}

// ============================================================================
// Settings — per submission
// ============================================================================

/// Identifies one submission instance.
#[derive(Debug, Clone)]
pub struct SubmitSettings {
    /// Unique submission identifier (used as the work subdirectory name)
    pub submission_id: String,

    /// Who submitted
    pub student: String,

    /// Where the submitted sources live
    pub source_dir: PathBuf,
}

// ============================================================================
// Verdict
// ============================================================================

/// Terminal classification of one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    #[default]
    Pending,
    CompilationError,
    ValidationError,
    TestError,
    Success,
}

impl fmt::Display for SubmitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::CompilationError => write!(f, "COMPILATION_ERROR"),
            Self::ValidationError => write!(f, "VALIDATION_ERROR"),
            Self::TestError => write!(f, "TEST_ERROR"),
            Self::Success => write!(f, "SUCCESS"),
        }
    }
}

/// The pipeline's output: one status plus ordered diagnostics.
///
/// Each stage constructs its own result; once returned it is treated as a
/// value and never mutated across stage boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub status: SubmitStatus,
    pub messages: Vec<String>,
}

impl ValidationResult {
    /// A result carrying a failure status and a single message.
    pub fn failed(status: SubmitStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            messages: vec![message.into()],
        }
    }
}

// ============================================================================
// Artifact type manifest
// ============================================================================

/// Type metadata emitted by the submission's toolchain alongside the
/// compiled artifact, consumed read-only by the capability checker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactManifest {
    /// Exported types, in declaration order
    #[serde(default)]
    pub types: Vec<ExportedType>,
}

/// One exported type and the contracts it implements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedType {
    /// Unqualified type name
    pub name: String,

    /// Names of implemented contracts
    #[serde(default)]
    pub implements: Vec<String>,
}

// ============================================================================
// Audit events
// ============================================================================

/// Audit event for the JSONL run log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    RunStarted {
        submission: String,
        student: String,
        assignment: String,
        run_id: String,
        revisa_version: String,
    },
    StageFinished {
        submission: String,
        stage: String,
        status: SubmitStatus,
    },
    RunFinished {
        submission: String,
        run_id: String,
        status: SubmitStatus,
        messages: u32,
        total_seconds: f64,
        artifact_hash: Option<String>,
    },
}

/// Timestamped event wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampedEvent {
    pub ts: String,
    #[serde(flatten)]
    pub event: AuditEvent,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_settings_parse() {
        let yaml = r#"
version: "1.0"
name: cs101-grader
compiler: /usr/local/bin/subc
compiler_args: ["{{source}}", "-o", "{{artifact}}", "--types", "{{manifest}}"]
test_runner: /usr/local/bin/subtest
test_runner_args: ["{{artifact}}", "--suite", "{{tests}}"]
work_dir: /var/lib/revisa/work
"#;
        let settings: SystemSettings = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(settings.version, "1.0");
        assert_eq!(settings.name, "cs101-grader");
        assert_eq!(settings.compiler, "/usr/local/bin/subc");
        assert_eq!(settings.compiler_args.len(), 5);
        assert_eq!(settings.work_dir, PathBuf::from("/var/lib/revisa/work"));
    }

    #[test]
    fn test_system_settings_arg_defaults() {
        let yaml = r#"
version: "1.0"
name: minimal
compiler: cc
test_runner: runner
work_dir: /tmp/work
"#;
        let settings: SystemSettings = serde_yaml_ng::from_str(yaml).unwrap();
        assert!(settings.compiler_args.is_empty());
        assert!(settings.test_runner_args.is_empty());
    }

    #[test]
    fn test_assignment_settings_parse() {
        let yaml = r#"
name: week3-stack
class_to_implement: BoundedStack
interface_to_implement: Stack
test_suite: /srv/assignments/week3/tests.json
"#;
        let settings: AssignmentSettings = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(settings.class_to_implement, "BoundedStack");
        assert_eq!(settings.interface_to_implement, "Stack");
        assert!(settings.test_suite.is_some());
    }

    #[test]
    fn test_assignment_settings_no_suite() {
        let yaml = r#"
name: warmup
class_to_implement: Greeter
interface_to_implement: Greeting
"#;
        let settings: AssignmentSettings = serde_yaml_ng::from_str(yaml).unwrap();
        assert!(settings.test_suite.is_none());
    }

    #[test]
    fn test_submit_status_default_is_pending() {
        assert_eq!(SubmitStatus::default(), SubmitStatus::Pending);
        assert_eq!(ValidationResult::default().status, SubmitStatus::Pending);
    }

    #[test]
    fn test_submit_status_display() {
        assert_eq!(SubmitStatus::CompilationError.to_string(), "COMPILATION_ERROR");
        assert_eq!(SubmitStatus::ValidationError.to_string(), "VALIDATION_ERROR");
        assert_eq!(SubmitStatus::Success.to_string(), "SUCCESS");
    }

    #[test]
    fn test_validation_result_failed() {
        let r = ValidationResult::failed(SubmitStatus::TestError, "no logfile found");
        assert_eq!(r.status, SubmitStatus::TestError);
        assert_eq!(r.messages, vec!["no logfile found"]);
    }

    #[test]
    fn test_manifest_parse() {
        let json = r#"{
  "types": [
    {"name": "BoundedStack", "implements": ["Stack", "Clearable"]},
    {"name": "Helper"}
  ]
}"#;
        let manifest: ArtifactManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.types.len(), 2);
        assert_eq!(manifest.types[0].implements, vec!["Stack", "Clearable"]);
        assert!(manifest.types[1].implements.is_empty());
    }

    #[test]
    fn test_audit_event_serde() {
        let event = AuditEvent::RunStarted {
            submission: "s-42".to_string(),
            student: "alice".to_string(),
            assignment: "week3-stack".to_string(),
            run_id: "r-abc".to_string(),
            revisa_version: "0.6.2".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"run_started\""));
        assert!(json.contains("\"run_id\":\"r-abc\""));
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&SubmitStatus::CompilationError).unwrap();
        assert_eq!(json, "\"compilation_error\"");
        let back: SubmitStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SubmitStatus::CompilationError);
    }
}
