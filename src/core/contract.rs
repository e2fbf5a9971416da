//! Capability checker — verifies the compiled artifact exposes the
//! assignment's required type and contract.
//!
//! The check runs against the type manifest the submission's toolchain
//! emits next to the artifact, not against the submitted source. Lookup
//! is exact name equality, first match wins.

use super::types::{AssignmentSettings, SubmitStatus, ValidationResult};
use crate::fsys::FileSystem;
use std::path::Path;

/// Check the business rules for a compiled artifact.
///
/// A missing artifact skips the manifest entirely and falls through to
/// "required type not found".
pub fn check_business_rules(
    fs: &dyn FileSystem,
    artifact: &Path,
    manifest_path: &Path,
    assignment: &AssignmentSettings,
) -> ValidationResult {
    let mut implemented_class = None;

    if fs.exists(artifact) {
        let manifest = match fs.load_manifest(manifest_path) {
            Ok(manifest) => manifest,
            Err(e) => return ValidationResult::failed(SubmitStatus::ValidationError, e),
        };
        implemented_class = manifest
            .types
            .into_iter()
            .find(|t| t.name == assignment.class_to_implement);
    }

    let Some(class) = implemented_class else {
        return ValidationResult::failed(
            SubmitStatus::ValidationError,
            format!(
                "the class to implement ({}) is not found",
                assignment.class_to_implement
            ),
        );
    };

    let implements_required = class
        .implements
        .iter()
        .any(|i| i == &assignment.interface_to_implement);
    if !implements_required {
        return ValidationResult::failed(
            SubmitStatus::ValidationError,
            format!(
                "the class to implement ({}) does not implement the required interface {}",
                assignment.class_to_implement, assignment.interface_to_implement
            ),
        );
    }

    ValidationResult::default()
}
