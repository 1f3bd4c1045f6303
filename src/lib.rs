//! Skillcheck - Schema validation for skill description documents
//!
//! Architecture: Clean Architecture - Library interface serves as the application layer
//! - Pure domain logic separated from infrastructure concerns
//! - Clean boundaries between the validation pipeline and output formatting
//! - Packaging collaborators inspect `ValidationResult::valid` before proceeding
//!
//! A skill document is a markdown file beginning with a YAML frontmatter
//! block. The validator extracts the frontmatter, checks it and the body
//! against a fixed schema (naming, length, and content-quality rules), and
//! returns a [`ValidationResult`] whose `errors` and `warnings` are separated:
//! errors make the skill invalid, warnings are advisory only.
//!
//! ```no_run
//! use skillcheck::SkillValidator;
//!
//! let validator = SkillValidator::new();
//! let result = validator.validate_directory("skills/my-skill");
//! if !result.valid {
//!     for issue in &result.errors {
//!         eprintln!("{}", issue.format_display());
//!     }
//! }
//! ```

pub mod config;
pub mod domain;
pub mod frontmatter;
pub mod report;
pub mod rules;
pub mod scanner;

// Re-export main types for convenient access
pub use domain::issues::{
    Issue, Severity, SkillError, SkillResult, ValidationResult, DESCRIPTION_DISPLAY_LIMIT,
};

pub use config::{ParserKind, SchemaConfig};

pub use frontmatter::{
    ExtractError, FallbackParser, FrontmatterExtractor, FrontmatterParser, Metadata,
    MetadataValue, StrictYamlParser,
};

pub use report::{OutputFormat, ReportFormatter, ReportOptions};

pub use scanner::Scanner;

use std::path::Path;

/// Main validator providing high-level validation operations
pub struct SkillValidator {
    scanner: Scanner,
    report_formatter: ReportFormatter,
}

impl SkillValidator {
    /// Create a validator with the given configuration
    pub fn with_config(config: SchemaConfig) -> Self {
        Self { scanner: Scanner::new(config), report_formatter: ReportFormatter::default() }
    }

    /// Create a validator with the default schema
    pub fn new() -> Self {
        Self::with_config(SchemaConfig::default())
    }

    /// Create a validator loading configuration from file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> SkillResult<Self> {
        let config = SchemaConfig::load_from_file(path)?;
        Ok(Self::with_config(config))
    }

    /// Set custom report formatter
    pub fn with_report_formatter(mut self, formatter: ReportFormatter) -> Self {
        self.report_formatter = formatter;
        self
    }

    /// The schema this validator checks against
    pub fn config(&self) -> &SchemaConfig {
        self.scanner.config()
    }

    /// Validate raw document text supplied by an ingestion collaborator
    pub fn validate_content(&self, content: &str, path: impl AsRef<Path>) -> ValidationResult {
        self.scanner.validate_content(content, path.as_ref())
    }

    /// Validate a single skill document file
    pub fn validate_file<P: AsRef<Path>>(&self, path: P) -> ValidationResult {
        self.scanner.validate_file(path)
    }

    /// Validate a skill directory (document plus cross-file references)
    pub fn validate_directory<P: AsRef<Path>>(&self, dir: P) -> ValidationResult {
        self.scanner.validate_directory(dir)
    }

    /// Format a validation result for output
    pub fn format_result(
        &self,
        result: &ValidationResult,
        format: OutputFormat,
    ) -> SkillResult<String> {
        self.report_formatter.format_result(result, format)
    }
}

impl Default for SkillValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to validate a skill file with default settings
pub fn validate_file<P: AsRef<Path>>(path: P) -> ValidationResult {
    SkillValidator::new().validate_file(path)
}

/// Convenience function to validate a skill directory with default settings
pub fn validate_directory<P: AsRef<Path>>(dir: P) -> ValidationResult {
    SkillValidator::new().validate_directory(dir)
}
