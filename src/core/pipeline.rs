//! Validation pipeline — compile, check the contract, run the tests.
//!
//! Strict short-circuit sequence. Each stage fully resolves its own
//! failure classification and attaches diagnostics before returning; the
//! orchestrator never re-interprets a lower stage's status, it only
//! decides whether to continue. Every external tool invocation happens
//! exactly once.

use super::buildlog;
use super::contract;
use super::descriptor::BatchDescriptor;
use super::testlog;
use super::types::{
    AssignmentSettings, AuditEvent, SubmitSettings, SubmitStatus, SystemSettings, ValidationResult,
};
use crate::audit::{eventlog, hasher};
use crate::exec::CommandRunner;
use crate::fsys::FileSystem;
use std::path::Path;
use std::time::Instant;

/// Runs the validation pipeline against injected capabilities.
pub struct Validator<'a> {
    fs: &'a dyn FileSystem,
    runner: &'a dyn CommandRunner,
    state_dir: Option<&'a Path>,
}

impl<'a> Validator<'a> {
    pub fn new(fs: &'a dyn FileSystem, runner: &'a dyn CommandRunner) -> Self {
        Self {
            fs,
            runner,
            state_dir: None,
        }
    }

    /// Enable the audit trail under `state_dir`. Audit IO failures never
    /// alter the verdict.
    pub fn with_audit(mut self, state_dir: &'a Path) -> Self {
        self.state_dir = Some(state_dir);
        self
    }

    /// The main processing method: validate one submission end to end.
    ///
    /// `Err` covers only descriptor preparation failure; every grading
    /// outcome, including tool failures, is a `ValidationResult`.
    pub fn process(
        &self,
        sys: &SystemSettings,
        assignment: &AssignmentSettings,
        submit: &SubmitSettings,
    ) -> Result<ValidationResult, String> {
        let start = Instant::now();
        let run_id = eventlog::generate_run_id();
        let desc = BatchDescriptor::prepare(sys, assignment, submit)?;

        self.log(
            submit,
            AuditEvent::RunStarted {
                submission: submit.submission_id.clone(),
                student: submit.student.clone(),
                assignment: assignment.name.clone(),
                run_id: run_id.clone(),
                revisa_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        );

        let verdict = self.run_stages(&desc, assignment, submit);

        self.log(
            submit,
            AuditEvent::RunFinished {
                submission: submit.submission_id.clone(),
                run_id,
                status: verdict.status.clone(),
                messages: verdict.messages.len() as u32,
                total_seconds: start.elapsed().as_secs_f64(),
                artifact_hash: hasher::hash_file(&desc.artifact).ok(),
            },
        );

        Ok(verdict)
    }

    fn run_stages(
        &self,
        desc: &BatchDescriptor,
        assignment: &AssignmentSettings,
        submit: &SubmitSettings,
    ) -> ValidationResult {
        let mut result = self.compile(&desc.build_script, &desc.build_log);
        self.log_stage(submit, "compile", &result.status);
        if result.status == SubmitStatus::CompilationError {
            return result;
        }

        // Guards against a build tool that exits 0 but produces nothing
        if !self.fs.exists(&desc.artifact) {
            return ValidationResult::failed(
                SubmitStatus::CompilationError,
                "compiled artifact not found",
            );
        }

        result = contract::check_business_rules(self.fs, &desc.artifact, &desc.manifest, assignment);
        self.log_stage(submit, "contract", &result.status);
        if result.status == SubmitStatus::ValidationError {
            return result;
        }

        result = self.run_tests(&desc.test_script, &desc.test_log);
        self.log_stage(submit, "test", &result.status);
        if result.status == SubmitStatus::TestError {
            return result;
        }

        result.status = SubmitStatus::Success;
        result
    }

    /// Compilation stage: exit code plus log contents decide the outcome.
    fn compile(&self, build_script: &Path, build_log: &Path) -> ValidationResult {
        let code = match self.runner.execute_sync(build_script) {
            Ok(code) => code,
            Err(e) => {
                return ValidationResult::failed(
                    SubmitStatus::CompilationError,
                    format!("command error: {}", e),
                )
            }
        };

        let mut result = ValidationResult::default();
        if code != 0 {
            result.status = SubmitStatus::CompilationError;
            if self.fs.exists(build_log) {
                result.messages = self.read_build_errors(build_log);
            } else {
                result.messages.push("build logfile not found".to_string());
            }
        } else if self.fs.exists(build_log) {
            // exit 0 is not trusted on its own: some build tools report
            // errors only in the log
            let errors = self.read_build_errors(build_log);
            if !errors.is_empty() {
                result.status = SubmitStatus::CompilationError;
                result.messages = errors;
            }
        }

        result
    }

    fn read_build_errors(&self, build_log: &Path) -> Vec<String> {
        match self.fs.read_to_string(build_log) {
            Ok(content) => buildlog::read_errors(&content),
            Err(e) => vec![format!("build log unreadable: {}", e)],
        }
    }

    /// Test stage: a zero exit code is final; otherwise the report is
    /// interpreted for failure messages.
    fn run_tests(&self, test_script: &Path, test_log: &Path) -> ValidationResult {
        let code = match self.runner.execute_sync(test_script) {
            Ok(code) => code,
            Err(e) => {
                return ValidationResult::failed(
                    SubmitStatus::TestError,
                    format!("command error: {}", e),
                )
            }
        };

        let mut result = ValidationResult::default();
        if code != 0 {
            result.status = SubmitStatus::TestError;
            if !self.fs.exists(test_log) {
                result.messages.push("no logfile found".to_string());
                return result;
            }
            match self.fs.load_json(test_log) {
                Ok(report) => result.messages = testlog::read_failures(&report),
                Err(e) => result.messages.push(format!("test log unreadable: {}", e)),
            }
        }

        result
    }

    fn log(&self, submit: &SubmitSettings, event: AuditEvent) {
        if let Some(state_dir) = self.state_dir {
            let _ = eventlog::append_event(state_dir, &submit.submission_id, event);
        }
    }

    fn log_stage(&self, submit: &SubmitSettings, stage: &str, status: &SubmitStatus) {
        self.log(
            submit,
            AuditEvent::StageFinished {
                submission: submit.submission_id.clone(),
                stage: stage.to_string(),
                status: status.clone(),
            },
        );
    }
}
