//! Validation types and the billing validator.
//!
//! Validation findings are data, never errors: both the billing validator
//! and the CSV pre-encode validator collect [`ValidationIssue`] values
//! into arrays and leave acting on them to the caller.

mod billing;

pub use billing::validate_billing;

use serde::{Deserialize, Serialize};

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// A stable code identifying the kind of finding.
    pub code: String,
    /// A human-readable description.
    pub message: String,
    /// The affected user, when user-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// The affected field, when field-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// The affected record index, for file-format findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_index: Option<usize>,
}

impl ValidationIssue {
    /// Creates a finding with just a code and message.
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            user_id: None,
            field: None,
            record_index: None,
        }
    }

    /// Attaches the affected user.
    pub fn for_user(mut self, user_id: &str) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    /// Attaches the affected field.
    pub fn on_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }

    /// Attaches the affected record index.
    pub fn at_record(mut self, index: usize) -> Self {
        self.record_index = Some(index);
        self
    }
}

/// The outcome of a validation pass: `valid` is true iff no errors were
/// collected. Warnings never affect validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True when no errors were found.
    pub valid: bool,
    /// Blocking findings.
    pub errors: Vec<ValidationIssue>,
    /// Non-blocking findings.
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Builds a report from collected findings.
    pub fn from_findings(errors: Vec<ValidationIssue>, warnings: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}
