//! Core domain models for validation issues and results
//!
//! Architecture: Rich Domain Models - Issues are immutable values, the result is an aggregate
//! - An Issue is created by exactly one rule and consumed only by the result assembler
//! - ValidationResult acts as the aggregate root; its `valid` flag is derived from
//!   the error list at construction time and is never set independently

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity levels for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warnings that should be addressed but don't block packaging
    Warning,
    /// Errors that make the skill invalid
    Error,
}

impl Severity {
    /// Whether this severity level should cause validation to fail
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Convert to string for display
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A single validation finding, tagged with its severity and the field it concerns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Severity level of this issue
    pub severity: Severity,
    /// The field or document region the issue concerns (e.g. "name", "body")
    pub field: String,
    /// Human-readable description of the issue
    pub message: String,
}

impl Issue {
    /// Create a new issue
    pub fn new(severity: Severity, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { severity, field: field.into(), message: message.into() }
    }

    /// Create an error-level issue
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, field, message)
    }

    /// Create a warning-level issue
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, field, message)
    }

    /// Whether this issue is blocking (makes the skill invalid)
    pub fn is_blocking(&self) -> bool {
        self.severity.is_blocking()
    }

    /// Format issue for display
    pub fn format_display(&self) -> String {
        format!("[{}] {}: {}", self.severity.as_str(), self.field, self.message)
    }
}

/// Number of characters of the description carried in the result for display
pub const DESCRIPTION_DISPLAY_LIMIT: usize = 100;

/// Complete result of validating one skill document
///
/// `valid` is true iff `errors` is empty; every constructor derives it from the
/// error list. Warnings never affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the skill passed validation (no blocking issues)
    pub valid: bool,
    /// Path of the validated skill file or directory
    pub skill_path: PathBuf,
    /// The skill name from frontmatter, when present and a string
    pub name: Option<String>,
    /// The skill description, truncated for display
    pub description: Option<String>,
    /// Blocking issues, in rule order
    pub errors: Vec<Issue>,
    /// Advisory issues, in rule order
    pub warnings: Vec<Issue>,
}

impl ValidationResult {
    /// Build a result from a full issue list, partitioning by severity
    pub fn from_issues(
        skill_path: impl Into<PathBuf>,
        name: Option<String>,
        description: Option<String>,
        issues: Vec<Issue>,
    ) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            issues.into_iter().partition(Issue::is_blocking);

        Self {
            valid: errors.is_empty(),
            skill_path: skill_path.into(),
            name,
            description: description.map(truncate_for_display),
            errors,
            warnings,
        }
    }

    /// Build a terminal failure result carrying a single structural error
    pub fn structural_failure(skill_path: impl Into<PathBuf>, error: Issue) -> Self {
        Self {
            valid: false,
            skill_path: skill_path.into(),
            name: None,
            description: None,
            errors: vec![error],
            warnings: Vec::new(),
        }
    }

    /// Append an advisory warning after assembly (used by cross-file checks)
    pub fn push_warning(&mut self, warning: Issue) {
        debug_assert!(!warning.is_blocking());
        self.warnings.push(warning);
    }

    /// Whether any blocking issues were found
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Total number of issues across both severities
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }
}

/// Truncate a description to the display limit, appending an ellipsis marker
fn truncate_for_display(description: String) -> String {
    if description.chars().count() > DESCRIPTION_DISPLAY_LIMIT {
        let truncated: String = description.chars().take(DESCRIPTION_DISPLAY_LIMIT).collect();
        format!("{truncated}...")
    } else {
        description
    }
}

/// Error types that can occur during validation setup and I/O
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    /// Configuration file could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File could not be read or accessed
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Output serialization failed
    #[error("Report error: {message}")]
    Report { message: String },
}

impl SkillError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create a report error
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report { message: message.into() }
    }
}

/// Result type for Skillcheck operations
pub type SkillResult<T> = Result<T, SkillError>;
