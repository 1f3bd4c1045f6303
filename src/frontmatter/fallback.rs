//! Restricted line-oriented frontmatter parser
//!
//! Recognizes only `key: value` lines plus indented continuation lines. It
//! cannot represent sequences or nested mappings; every value is a scalar
//! string. The pipeline surfaces that limitation as one advisory warning.

use crate::frontmatter::{ExtractError, FrontmatterParser, Metadata, MetadataValue};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref KEY_LINE: Regex =
        Regex::new(r"^([a-zA-Z_][a-zA-Z0-9_]*)\s*:\s*(.*)$").expect("key line pattern");
}

/// Fallback parser used when strict YAML parsing is not selected
#[derive(Debug, Default)]
pub struct FallbackParser;

impl FallbackParser {
    pub fn new() -> Self {
        Self
    }
}

impl FrontmatterParser for FallbackParser {
    fn parse(&self, block: &str) -> Result<Metadata, ExtractError> {
        let mut metadata = Metadata::new();
        let mut current_key: Option<String> = None;
        let mut current_value_lines: Vec<String> = Vec::new();

        for line in block.lines() {
            if let Some(captures) = KEY_LINE.captures(line) {
                if let Some(key) = current_key.take() {
                    let value = current_value_lines.join("\n");
                    metadata.insert(key, MetadataValue::String(normalize_value(&value)));
                }
                current_key = Some(captures[1].to_string());
                current_value_lines = vec![captures[2].to_string()];
            } else if current_key.is_some() && (line.starts_with("  ") || line.starts_with('\t')) {
                current_value_lines.push(line.trim().to_string());
            }
        }

        if let Some(key) = current_key {
            let value = current_value_lines.join("\n");
            metadata.insert(key, MetadataValue::String(normalize_value(&value)));
        }

        Ok(metadata)
    }

    fn advisory(&self) -> Option<&'static str> {
        Some(
            "Using simplified frontmatter parser; nested structures and sequences \
             are not supported",
        )
    }
}

/// Trim a value and strip one layer of matching quote characters
fn normalize_value(value: &str) -> String {
    let value = value.trim();
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}
