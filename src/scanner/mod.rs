//! Skill document location and pipeline orchestration
//!
//! Architecture: Domain Services - The scanner coordinates the full validation workflow
//! - Locates the skill document, runs extraction, rules, and assembly in order
//! - Structural failures are terminal and return partial context (None fields)
//! - Layers cross-file reference checks over an already-assembled result

use crate::config::SchemaConfig;
use crate::domain::issues::{Issue, ValidationResult};
use crate::frontmatter::FrontmatterExtractor;
use crate::report::assemble;
use crate::rules;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

lazy_static! {
    /// Backtick-quoted inline references to files with known extensions
    static ref FILE_REFERENCE: Regex =
        Regex::new(r"`([^`]+\.(md|py|sh|json))`").expect("file reference pattern");
}

/// Runs the validation pipeline against files and skill directories
pub struct Scanner {
    config: SchemaConfig,
    extractor: FrontmatterExtractor,
}

impl Scanner {
    /// Create a scanner; the frontmatter parser is selected here, once
    pub fn new(config: SchemaConfig) -> Self {
        let extractor = FrontmatterExtractor::new(config.parser);
        Self { config, extractor }
    }

    /// The configuration this scanner validates against
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Validate raw document text, independent of its origin
    pub fn validate_content(&self, content: &str, path: impl Into<PathBuf>) -> ValidationResult {
        let path = path.into();

        let (metadata, body) = match self.extractor.extract(content) {
            Ok(parts) => parts,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "frontmatter extraction failed");
                return ValidationResult::structural_failure(
                    path,
                    Issue::error("frontmatter", e.to_string()),
                );
            }
        };

        let issues = rules::run_all(&metadata, &body, &self.config);
        assemble(path, &metadata, issues, self.extractor.advisory())
    }

    /// Validate a skill document file
    pub fn validate_file(&self, path: impl AsRef<Path>) -> ValidationResult {
        let path = path.as_ref();

        if !path.exists() {
            return ValidationResult::structural_failure(
                path,
                Issue::error("file", format!("File not found: {}", path.display())),
            );
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                return ValidationResult::structural_failure(
                    path,
                    Issue::error("file", format!("Failed to read file: {e}")),
                );
            }
        };

        self.validate_content(&content, path)
    }

    /// Validate a skill directory
    ///
    /// Expects the skill document at the configured filename directly inside
    /// `dir`. After the document pipeline completes, referenced files that do
    /// not exist relative to `dir` are appended as warnings; they never make
    /// a valid result invalid.
    pub fn validate_directory(&self, dir: impl AsRef<Path>) -> ValidationResult {
        let dir = dir.as_ref();
        let skill_path = dir.join(&self.config.skill_file_name);

        if !skill_path.exists() {
            return ValidationResult::structural_failure(
                dir,
                Issue::error(
                    "structure",
                    format!("No {} found in {}", self.config.skill_file_name, dir.display()),
                ),
            );
        }

        let mut result = self.validate_file(&skill_path);

        // Reference checking is best-effort: an unreadable document was
        // already reported by validate_file, so just skip the pass.
        match fs::read_to_string(&skill_path) {
            Ok(content) => {
                for warning in check_file_references(&content, dir) {
                    result.push_warning(warning);
                }
            }
            Err(e) => {
                tracing::debug!(path = %skill_path.display(), error = %e, "skipping reference check");
            }
        }

        result
    }
}

/// Find backtick-quoted file references in the document and report the missing ones
fn check_file_references(content: &str, dir: &Path) -> Vec<Issue> {
    let mut warnings = Vec::new();

    for captures in FILE_REFERENCE.captures_iter(content) {
        let reference = &captures[1];
        if !dir.join(reference).exists() {
            warnings.push(Issue::warning(
                "references",
                format!("Referenced file not found: {reference}"),
            ));
        }
    }

    tracing::debug!(missing = warnings.len(), "reference check complete");
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserKind;
    use std::fs;
    use tempfile::TempDir;

    fn scanner() -> Scanner {
        Scanner::new(SchemaConfig::default())
    }

    fn valid_document() -> String {
        format!(
            "---\nname: my-skill\ndescription: Use this when doing X in a large multi-file repository.\n---\n\n\
             # My Skill\n\n## Examples\n\n{}",
            "word ".repeat(150)
        )
    }

    #[test]
    fn test_valid_document_is_clean() {
        let result = scanner().validate_content(&valid_document(), "skills/demo/SKILL.md");
        assert!(result.valid, "{:?}", result.errors);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(result.name.as_deref(), Some("my-skill"));
    }

    #[test]
    fn test_missing_frontmatter_runs_no_rules() {
        let result = scanner().validate_content("# Just markdown\n", "s");
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "frontmatter");
        assert!(result.warnings.is_empty());
        assert!(result.name.is_none());
        assert!(result.description.is_none());
    }

    #[test]
    fn test_unterminated_frontmatter_is_terminal() {
        let result = scanner().validate_content("---\nname: test\n\nNo closing\n", "s");
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("missing closing ---"));
        assert!(result.name.is_none());
        assert!(result.description.is_none());
    }

    #[test]
    fn test_unexpected_property_reported_once() {
        let content = valid_document().replace("---\nname:", "---\nfoo: bar\nname:");
        let result = scanner().validate_content(&content, "s");
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("foo"));
    }

    #[test]
    fn test_fallback_parser_emits_one_advisory() {
        let config = SchemaConfig { parser: ParserKind::Fallback, ..SchemaConfig::default() };
        let result = Scanner::new(config).validate_content(&valid_document(), "s");

        assert!(result.valid);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].field, "frontmatter");
        assert!(result.warnings[0].message.contains("simplified frontmatter parser"));
    }

    #[test]
    fn test_validate_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("SKILL.md");
        let result = scanner().validate_file(&missing);

        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "file");
        assert!(result.errors[0].message.starts_with("File not found:"));
    }

    #[test]
    fn test_validate_directory_missing_document() {
        let temp_dir = TempDir::new().unwrap();
        let result = scanner().validate_directory(temp_dir.path());

        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "structure");
        assert!(result.errors[0]
            .message
            .starts_with(&format!("No SKILL.md found in {}", temp_dir.path().display())));
        assert!(result.name.is_none());
    }

    #[test]
    fn test_validate_directory_clean_skill() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("SKILL.md"), valid_document()).unwrap();

        let result = scanner().validate_directory(temp_dir.path());
        assert!(result.valid);
        assert!(result.warnings.is_empty());
        assert_eq!(result.skill_path, temp_dir.path().join("SKILL.md"));
    }

    #[test]
    fn test_missing_reference_is_warning_only() {
        let temp_dir = TempDir::new().unwrap();
        let content = format!("{}\nRun `scripts/run.py` first.\n", valid_document());
        fs::write(temp_dir.path().join("SKILL.md"), content).unwrap();

        let result = scanner().validate_directory(temp_dir.path());
        assert!(result.valid, "missing references never block");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].field, "references");
        assert!(result.warnings[0].message.contains("scripts/run.py"));
    }

    #[test]
    fn test_existing_reference_draws_no_warning() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("scripts")).unwrap();
        fs::write(temp_dir.path().join("scripts/run.py"), "print('hi')\n").unwrap();
        let content = format!("{}\nRun `scripts/run.py` first.\n", valid_document());
        fs::write(temp_dir.path().join("SKILL.md"), content).unwrap();

        let result = scanner().validate_directory(temp_dir.path());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_reference_pattern_known_extensions_only() {
        let issues = check_file_references(
            "See `docs/guide.md`, `run.sh`, `conf.json`, and `ignore.txt`.",
            Path::new("/nonexistent"),
        );
        let mentioned: Vec<_> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(mentioned.len(), 3);
        assert!(mentioned.iter().all(|m| !m.contains("ignore.txt")));
    }

    #[test]
    fn test_idempotent_validation() {
        let temp_dir = TempDir::new().unwrap();
        let content = valid_document().replace("my-skill", "my_skill");
        fs::write(temp_dir.path().join("SKILL.md"), content).unwrap();

        let scanner = scanner();
        let first = scanner.validate_directory(temp_dir.path());
        let second = scanner.validate_directory(temp_dir.path());
        assert_eq!(first, second);
    }

    #[test]
    fn test_lowercase_diagnosis_wins_over_underscore() {
        let content = valid_document().replace("my-skill", "My_Skill!");
        let result = scanner().validate_content(&content, "s");

        assert!(!result.valid);
        assert!(result.errors.iter().any(|i| i.message.contains("must be lowercase")));
        assert!(!result
            .warnings
            .iter()
            .any(|i| i.message.contains("underscores")));
    }
}
