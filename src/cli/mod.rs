//! CLI subcommands — init, validate, grade, history.

use crate::audit::eventlog;
use crate::core::types::{AuditEvent, SubmitSettings, SubmitStatus};
use crate::core::{parser, pipeline};
use crate::exec::LocalRunner;
use crate::fsys::OsFileSystem;
use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new revisa project
    Init {
        /// Directory to initialize (default: current)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Validate settings files without grading anything
    Validate {
        /// Path to revisa.yaml
        #[arg(short, long, default_value = "revisa.yaml")]
        file: PathBuf,

        /// Also validate an assignment settings file
        #[arg(short, long)]
        assignment: Option<PathBuf>,
    },

    /// Validate one submission: compile, check the contract, run tests
    Grade {
        /// Path to revisa.yaml
        #[arg(short, long, default_value = "revisa.yaml")]
        file: PathBuf,

        /// Assignment settings file
        #[arg(short, long)]
        assignment: PathBuf,

        /// Submission source directory
        #[arg(short, long)]
        source: PathBuf,

        /// Student (or team) name
        #[arg(long)]
        student: String,

        /// Submission identifier (generated when omitted)
        #[arg(long)]
        id: Option<String>,

        /// State directory for the audit trail
        #[arg(long, default_value = "state")]
        state_dir: PathBuf,
    },

    /// Show past validation runs from the audit trail
    History {
        /// State directory
        #[arg(long, default_value = "state")]
        state_dir: PathBuf,

        /// Only this submission
        #[arg(short, long)]
        submission: Option<String>,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), String> {
    match cmd {
        Commands::Init { path } => cmd_init(&path),
        Commands::Validate { file, assignment } => cmd_validate(&file, assignment.as_deref()),
        Commands::Grade {
            file,
            assignment,
            source,
            student,
            id,
            state_dir,
        } => cmd_grade(&file, &assignment, &source, &student, id, &state_dir),
        Commands::History {
            state_dir,
            submission,
        } => cmd_history(&state_dir, submission.as_deref()),
    }
}

fn cmd_init(path: &Path) -> Result<(), String> {
    let config_path = path.join("revisa.yaml");
    if config_path.exists() {
        return Err(format!("{} already exists", config_path.display()));
    }

    let state_dir = path.join("state");
    std::fs::create_dir_all(&state_dir).map_err(|e| format!("cannot create state dir: {}", e))?;

    let template = r#"version: "1.0"
name: my-course-grader

compiler: /usr/local/bin/subc
compiler_args: ["{{source}}", "-o", "{{artifact}}", "--types", "{{manifest}}"]

test_runner: /usr/local/bin/subtest
test_runner_args: ["{{artifact}}", "--suite", "{{tests}}", "--report", "{{report}}"]

work_dir: work
"#;
    std::fs::write(&config_path, template)
        .map_err(|e| format!("cannot write {}: {}", config_path.display(), e))?;

    println!("Initialized revisa project at {}", path.display());
    println!("  Created: {}", config_path.display());
    println!("  Created: {}/", state_dir.display());
    Ok(())
}

fn cmd_validate(file: &Path, assignment: Option<&Path>) -> Result<(), String> {
    let settings = parser::parse_system_file(file)?;
    let mut errors = parser::validate_system(&settings);

    let assignment_name = match assignment {
        Some(path) => {
            let a = parser::parse_assignment_file(path)?;
            errors.extend(parser::validate_assignment(&a));
            Some(a.name)
        }
        None => None,
    };

    if errors.is_empty() {
        match assignment_name {
            Some(name) => println!("OK: {} + assignment {}", settings.name, name),
            None => println!("OK: {}", settings.name),
        }
        Ok(())
    } else {
        for e in &errors {
            eprintln!("  ERROR: {}", e);
        }
        Err(format!("{} validation error(s)", errors.len()))
    }
}

/// Parse and validate both settings files, returning errors if invalid.
fn parse_and_validate(
    file: &Path,
    assignment: &Path,
) -> Result<
    (
        crate::core::types::SystemSettings,
        crate::core::types::AssignmentSettings,
    ),
    String,
> {
    let sys = parser::parse_system_file(file)?;
    let assignment = parser::parse_assignment_file(assignment)?;
    let mut errors = parser::validate_system(&sys);
    errors.extend(parser::validate_assignment(&assignment));
    if errors.is_empty() {
        return Ok((sys, assignment));
    }
    for e in &errors {
        eprintln!("  ERROR: {}", e);
    }
    Err("validation failed".to_string())
}

fn cmd_grade(
    file: &Path,
    assignment_file: &Path,
    source: &Path,
    student: &str,
    id: Option<String>,
    state_dir: &Path,
) -> Result<(), String> {
    let (sys, assignment) = parse_and_validate(file, assignment_file)?;

    let submit = SubmitSettings {
        submission_id: id.unwrap_or_else(eventlog::generate_run_id),
        student: student.to_string(),
        source_dir: source.to_path_buf(),
    };

    println!(
        "Grading {} (student: {}, assignment: {})",
        submit.submission_id, submit.student, assignment.name
    );

    let fs = OsFileSystem;
    let runner = LocalRunner;
    let validator = pipeline::Validator::new(&fs, &runner).with_audit(state_dir);
    let result = validator.process(&sys, &assignment, &submit)?;

    println!();
    println!("Verdict: {}", result.status);
    for message in &result.messages {
        println!("  - {}", message);
    }

    if result.status == SubmitStatus::Success {
        Ok(())
    } else {
        Err(format!("submission rejected: {}", result.status))
    }
}

fn cmd_history(state_dir: &Path, submission: Option<&str>) -> Result<(), String> {
    let entries = std::fs::read_dir(state_dir)
        .map_err(|e| format!("cannot read state dir {}: {}", state_dir.display(), e))?;

    let mut found = false;

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if let Some(filter) = submission {
            if name != filter {
                continue;
            }
        }

        if !entry.path().is_dir() {
            continue;
        }

        let events = match eventlog::read_events(state_dir, &name) {
            Ok(events) => events,
            Err(_) => continue,
        };
        if events.is_empty() {
            continue;
        }

        found = true;
        println!("Submission: {}", name);
        for te in &events {
            println!("  {} {}", te.ts, describe(&te.event));
        }
        println!();
    }

    if !found {
        println!("No runs found. Run `revisa grade` first.");
    }

    Ok(())
}

fn describe(event: &AuditEvent) -> String {
    match event {
        AuditEvent::RunStarted {
            student,
            assignment,
            run_id,
            ..
        } => format!("run {} started ({} / {})", run_id, student, assignment),
        AuditEvent::StageFinished { stage, status, .. } => {
            format!("stage {} finished: {}", stage, status)
        }
        AuditEvent::RunFinished {
            run_id,
            status,
            messages,
            total_seconds,
            ..
        } => format!(
            "run {} finished: {} ({} message(s), {:.1}s)",
            run_id, status, messages, total_seconds
        ),
    }
}
