//! Configuration loading and management for Skillcheck
//!
//! Architecture: Anti-Corruption Layer - Configuration translates external YAML formats
//! - Raw YAML structures are converted to clean domain constants
//! - Default schema limits are embedded in the domain, not infrastructure
//! - The configuration is immutable after startup; rules read it, never mutate it

use crate::domain::issues::{SkillError, SkillResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which frontmatter parser implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParserKind {
    /// Full YAML mapping syntax via serde_yaml
    #[default]
    Strict,
    /// Restricted `key: value` line parser; scalars only
    Fallback,
}

/// Schema constants governing skill validation
///
/// Defaults match the published skill conventions; a project can override them
/// from a YAML file, after which the values never change for the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Configuration format version
    pub version: String,
    /// Filename of the skill document inside a skill directory
    pub skill_file_name: String,
    /// Frontmatter parser selected at startup
    pub parser: ParserKind,
    /// Maximum length of the `name` field, in characters
    pub name_max_length: usize,
    /// Maximum length of the `description` field, in characters
    pub description_max_length: usize,
    /// Descriptions shorter than this draw a quality warning
    pub description_min_length: usize,
    /// Bodies with fewer whitespace-delimited words draw a quality warning
    pub body_min_words: usize,
    /// Bodies with more words draw a quality warning
    pub body_max_words: usize,
    /// Substrings that may not appear in a skill name (case-insensitive)
    pub reserved_words: Vec<String>,
    /// The closed set of frontmatter keys a skill may carry
    pub allowed_properties: Vec<String>,
    /// Case-insensitive substrings indicating the description explains when to use the skill
    pub trigger_phrases: Vec<String>,
    /// Case-insensitive substrings indicating the body carries examples or workflow guidance
    pub example_markers: Vec<String>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            skill_file_name: "SKILL.md".to_string(),
            parser: ParserKind::Strict,
            name_max_length: 64,
            description_max_length: 1024,
            description_min_length: 50,
            body_min_words: 100,
            body_max_words: 5000,
            reserved_words: vec!["anthropic".to_string(), "claude".to_string()],
            allowed_properties: vec![
                "name".to_string(),
                "description".to_string(),
                "license".to_string(),
                "allowed-tools".to_string(),
                "metadata".to_string(),
            ],
            trigger_phrases: vec![
                "when".to_string(),
                "use this".to_string(),
                "should be used".to_string(),
                "helps with".to_string(),
                "for".to_string(),
            ],
            example_markers: vec![
                "## example".to_string(),
                "### example".to_string(),
                "example:".to_string(),
                "examples".to_string(),
                "core tasks".to_string(),
                "workflow".to_string(),
            ],
        }
    }
}

impl SchemaConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SkillResult<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            SkillError::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            SkillError::config(format!(
                "Failed to parse config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from string content
    pub fn load_from_str(content: &str) -> SkillResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| SkillError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for consistency and correctness
    pub fn validate(&self) -> SkillResult<()> {
        if !["1.0"].contains(&self.version.as_str()) {
            return Err(SkillError::config(format!(
                "Unsupported configuration version: {}. Supported versions: 1.0",
                self.version
            )));
        }

        if self.skill_file_name.trim().is_empty() {
            return Err(SkillError::config("skill_file_name must not be empty"));
        }

        if self.name_max_length == 0 || self.description_max_length == 0 {
            return Err(SkillError::config(
                "name_max_length and description_max_length must be positive",
            ));
        }

        if self.body_min_words >= self.body_max_words {
            return Err(SkillError::config(format!(
                "body_min_words ({}) must be below body_max_words ({})",
                self.body_min_words, self.body_max_words
            )));
        }

        for word in &self.reserved_words {
            if word.trim().is_empty() {
                return Err(SkillError::config("reserved_words entries must not be empty"));
            }
            if *word != word.to_lowercase() {
                return Err(SkillError::config(format!(
                    "reserved word '{word}' must be lowercase (matching is case-insensitive)"
                )));
            }
        }

        if self.allowed_properties.is_empty() {
            return Err(SkillError::config("allowed_properties must not be empty"));
        }

        Ok(())
    }

    /// Convert to JSON for serialization
    pub fn to_json(&self) -> SkillResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SkillError::config(format!("Failed to serialize config: {e}")))
    }
}
