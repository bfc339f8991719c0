//! Validation for manuscript submissions

use serde::{Deserialize, Serialize};

use crate::manuscript::ManuscriptDraft;

/// Severity of a validation finding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

/// A validation error or warning on a submission field
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub field: String,
    pub message: String,
    pub severity: ValidationSeverity,
}

/// Check that a string carries non-whitespace content
pub fn non_blank(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Validate a draft and return errors/warnings
pub fn validate_draft(draft: &ManuscriptDraft) -> Vec<ValidationFinding> {
    let mut findings = Vec::new();

    // Required fields
    if !non_blank(&draft.title) {
        findings.push(ValidationFinding {
            field: "title".to_string(),
            message: "Title is required".to_string(),
            severity: ValidationSeverity::Error,
        });
    }

    if !non_blank(&draft.abstract_text) {
        findings.push(ValidationFinding {
            field: "abstract".to_string(),
            message: "Abstract is required".to_string(),
            severity: ValidationSeverity::Error,
        });
    }

    if !non_blank(&draft.discipline) {
        findings.push(ValidationFinding {
            field: "discipline".to_string(),
            message: "Discipline is required".to_string(),
            severity: ValidationSeverity::Error,
        });
    }

    // Warnings for recommended fields
    if draft.keywords.is_empty() {
        findings.push(ValidationFinding {
            field: "keywords".to_string(),
            message: "Keywords are recommended".to_string(),
            severity: ValidationSeverity::Warning,
        });
    }

    if draft.attachments.is_empty() {
        findings.push(ValidationFinding {
            field: "attachments".to_string(),
            message: "A manuscript file is recommended".to_string(),
            severity: ValidationSeverity::Warning,
        });
    }

    findings
}

/// Check if a draft is valid for submission (no errors)
pub fn is_submittable(draft: &ManuscriptDraft) -> bool {
    validate_draft(draft)
        .iter()
        .all(|f| f.severity != ValidationSeverity::Error)
}
