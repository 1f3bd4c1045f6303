//! Result assembly and report generation
//!
//! Architecture: Anti-Corruption Layer - Formatters translate domain objects to external formats
//! - Rule outputs are merged into one ValidationResult at a single point
//! - Each formatter encapsulates the rules for its specific output format
//! - Domain logic remains pure while supporting multiple presentation needs

use crate::domain::issues::{Issue, SkillError, SkillResult, ValidationResult};
use crate::frontmatter::Metadata;
use serde_json::Value as JsonValue;
use std::path::PathBuf;

/// Merge all rule outputs into one verdict
///
/// The parser advisory, when present, precedes every rule warning. `name` and
/// `description` are copied from the metadata only when they are strings; the
/// description is display-truncated by the result constructor.
pub fn assemble(
    skill_path: impl Into<PathBuf>,
    metadata: &Metadata,
    issues: Vec<Issue>,
    parser_advisory: Option<&str>,
) -> ValidationResult {
    let name = metadata.get("name").and_then(|v| v.as_str()).map(String::from);
    let description = metadata.get("description").and_then(|v| v.as_str()).map(String::from);

    let mut all_issues = Vec::with_capacity(issues.len() + 1);
    if let Some(text) = parser_advisory {
        all_issues.push(Issue::warning("frontmatter", text));
    }
    all_issues.extend(issues);

    ValidationResult::from_issues(skill_path, name, description, all_issues)
}

/// Supported output formats for validation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format with colors and a summary line
    Human,
    /// JSON format for programmatic consumption
    Json,
}

impl OutputFormat {
    /// Parse format from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Get all available format names
    pub fn all_formats() -> &'static [&'static str] {
        &["human", "json"]
    }
}

/// Options for customizing report output
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Whether to use colored output (for human format)
    pub use_colors: bool,
    /// Whether to list warnings in human output
    pub show_warnings: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { use_colors: true, show_warnings: true }
    }
}

/// Formats validation results for output
#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    options: ReportOptions,
}

impl ReportFormatter {
    /// Create a new report formatter with options
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Format a validation result in the specified format
    pub fn format_result(
        &self,
        result: &ValidationResult,
        format: OutputFormat,
    ) -> SkillResult<String> {
        match format {
            OutputFormat::Human => Ok(self.format_human(result)),
            OutputFormat::Json => self.format_json(result),
        }
    }

    fn format_human(&self, result: &ValidationResult) -> String {
        let mut output = String::new();

        let path = result.skill_path.display();
        if result.valid {
            if self.options.use_colors {
                output.push_str(&format!("\x1b[32m✓\x1b[0m {path}"));
            } else {
                output.push_str(&format!("✓ {path}"));
            }
        } else if self.options.use_colors {
            output.push_str(&format!("\x1b[31m✗\x1b[0m {path}"));
        } else {
            output.push_str(&format!("✗ {path}"));
        }

        if let Some(name) = &result.name {
            output.push_str(&format!(" ({name})"));
        }
        output.push('\n');

        for issue in &result.errors {
            if self.options.use_colors {
                output.push_str(&format!(
                    "  [\x1b[31merror\x1b[0m] {}: {}\n",
                    issue.field, issue.message
                ));
            } else {
                output.push_str(&format!("  [error] {}: {}\n", issue.field, issue.message));
            }
        }

        if self.options.show_warnings {
            for issue in &result.warnings {
                if self.options.use_colors {
                    output.push_str(&format!(
                        "  [\x1b[33mwarning\x1b[0m] {}: {}\n",
                        issue.field, issue.message
                    ));
                } else {
                    output.push_str(&format!("  [warning] {}: {}\n", issue.field, issue.message));
                }
            }
        }

        output.push_str(&self.format_summary(result));
        output
    }

    fn format_json(&self, result: &ValidationResult) -> SkillResult<String> {
        let errors: Vec<JsonValue> = result
            .errors
            .iter()
            .map(|i| serde_json::json!({"field": i.field, "message": i.message}))
            .collect();
        let warnings: Vec<JsonValue> = result
            .warnings
            .iter()
            .map(|i| serde_json::json!({"field": i.field, "message": i.message}))
            .collect();

        let json_result = serde_json::json!({
            "valid": result.valid,
            "skill_path": result.skill_path.display().to_string(),
            "name": result.name,
            "description": result.description,
            "errors": errors,
            "warnings": warnings,
        });

        serde_json::to_string_pretty(&json_result)
            .map_err(|e| SkillError::report(format!("JSON serialization failed: {e}")))
    }

    fn format_summary(&self, result: &ValidationResult) -> String {
        let error_count = result.errors.len();
        let warning_count = result.warnings.len();

        if result.issue_count() == 0 {
            return "  no issues\n".to_string();
        }

        let mut parts = Vec::new();
        if error_count > 0 {
            let text =
                format!("{} error{}", error_count, if error_count == 1 { "" } else { "s" });
            if self.options.use_colors {
                parts.push(format!("\x1b[31m{text}\x1b[0m"));
            } else {
                parts.push(text);
            }
        }
        if warning_count > 0 {
            let text = format!(
                "{} warning{}",
                warning_count,
                if warning_count == 1 { "" } else { "s" }
            );
            if self.options.use_colors {
                parts.push(format!("\x1b[33m{text}\x1b[0m"));
            } else {
                parts.push(text);
            }
        }

        format!("  {}\n", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::MetadataValue;

    fn plain_formatter() -> ReportFormatter {
        ReportFormatter::new(ReportOptions { use_colors: false, show_warnings: true })
    }

    fn sample_metadata() -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("name", MetadataValue::String("demo-skill".to_string()));
        metadata.insert(
            "description",
            MetadataValue::String("Use this when demonstrating reports.".to_string()),
        );
        metadata
    }

    #[test]
    fn test_assemble_partitions_and_copies_fields() {
        let issues = vec![
            Issue::error("name", "broken"),
            Issue::warning("body", "short"),
        ];
        let result = assemble("skills/demo/SKILL.md", &sample_metadata(), issues, None);

        assert!(!result.valid);
        assert_eq!(result.name.as_deref(), Some("demo-skill"));
        assert_eq!(
            result.description.as_deref(),
            Some("Use this when demonstrating reports.")
        );
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_assemble_advisory_precedes_rule_warnings() {
        let issues = vec![Issue::warning("body", "short")];
        let result =
            assemble("s", &Metadata::new(), issues, Some("restricted parser in use"));

        assert_eq!(result.warnings.len(), 2);
        assert_eq!(result.warnings[0].field, "frontmatter");
        assert!(result.warnings[0].message.contains("restricted parser"));
        assert_eq!(result.warnings[1].field, "body");
    }

    #[test]
    fn test_assemble_non_string_fields_become_none() {
        let mut metadata = Metadata::new();
        metadata.insert("name", MetadataValue::Number("7".to_string()));
        let result = assemble("s", &metadata, Vec::new(), None);
        assert!(result.name.is_none());
        assert!(result.description.is_none());
    }

    #[test]
    fn test_json_format_shape() {
        let issues = vec![
            Issue::error("name", "Required field 'name' is missing"),
            Issue::warning("body", "short"),
        ];
        let result = assemble("skills/demo", &sample_metadata(), issues, None);
        let output = plain_formatter().format_result(&result, OutputFormat::Json).unwrap();

        let json: JsonValue = serde_json::from_str(&output).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["skill_path"], "skills/demo");
        assert_eq!(json["name"], "demo-skill");
        assert_eq!(json["errors"][0]["field"], "name");
        assert_eq!(json["errors"][0]["message"], "Required field 'name' is missing");
        assert_eq!(json["warnings"].as_array().unwrap().len(), 1);
        // Issue severity is implied by the list, not serialized
        assert!(json["errors"][0].get("severity").is_none());
    }

    #[test]
    fn test_json_null_fields() {
        let result = assemble("s", &Metadata::new(), vec![Issue::error("file", "gone")], None);
        let output = plain_formatter().format_result(&result, OutputFormat::Json).unwrap();
        let json: JsonValue = serde_json::from_str(&output).unwrap();
        assert!(json["name"].is_null());
        assert!(json["description"].is_null());
    }

    #[test]
    fn test_human_format() {
        let issues = vec![
            Issue::error("name", "Field 'name' must be lowercase"),
            Issue::warning("body", "Skill body is quite short (3 words)"),
        ];
        let result = assemble("skills/demo", &sample_metadata(), issues, None);
        let output = plain_formatter().format_result(&result, OutputFormat::Human).unwrap();

        assert!(output.starts_with("✗ skills/demo (demo-skill)"));
        assert!(output.contains("[error] name: Field 'name' must be lowercase"));
        assert!(output.contains("[warning] body:"));
        assert!(output.contains("1 error, 1 warning"));
    }

    #[test]
    fn test_human_format_clean_result() {
        let result = assemble("skills/demo", &sample_metadata(), Vec::new(), None);
        let output = plain_formatter().format_result(&result, OutputFormat::Human).unwrap();
        assert!(output.starts_with("✓ skills/demo"));
        assert!(output.contains("no issues"));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("human"), Some(OutputFormat::Human));
        assert_eq!(OutputFormat::from_str("xml"), None);
    }
}
