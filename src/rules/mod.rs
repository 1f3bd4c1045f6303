//! Schema rules for skill documents
//!
//! Architecture: Domain Services - Each rule is a pure function over the parsed document
//! - Rules never short-circuit each other; callers always receive the complete issue list
//! - Rule constants (patterns, word lists) are immutable configuration owned here
//! - Issues are the only output; rules touch no filesystem or global state

use crate::config::SchemaConfig;
use crate::domain::issues::Issue;
use crate::frontmatter::{Metadata, MetadataValue};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Canonical name shape: lowercase alphanumerics with interior hyphens
    static ref NAME_PATTERN: Regex =
        Regex::new(r"^[a-z0-9][a-z0-9-]*[a-z0-9]$|^[a-z0-9]$").expect("name pattern");
    /// The full allowed character set, ignoring positional rules
    static ref NAME_CHARSET: Regex = Regex::new(r"^[a-z0-9-]+$").expect("name charset");
}

/// Run all four rule passes in order and return every issue found
///
/// Passes never suppress one another: a name that is both too long and
/// contains a reserved word reports both issues.
pub fn run_all(metadata: &Metadata, body: &str, config: &SchemaConfig) -> Vec<Issue> {
    let mut issues = check_allowed_properties(metadata, config);
    issues.extend(check_name(metadata, config));
    issues.extend(check_description(metadata, config));
    issues.extend(check_body(body, config));

    tracing::debug!(
        issues = issues.len(),
        keys = metadata.len(),
        "rule passes complete"
    );
    issues
}

/// Frontmatter keys must be a subset of the configured allow-list
pub fn check_allowed_properties(metadata: &Metadata, config: &SchemaConfig) -> Vec<Issue> {
    let mut unexpected: Vec<&str> = metadata
        .keys()
        .filter(|key| !config.allowed_properties.iter().any(|allowed| allowed == key))
        .collect();

    if unexpected.is_empty() {
        return Vec::new();
    }
    unexpected.sort_unstable();

    let mut allowed: Vec<&str> =
        config.allowed_properties.iter().map(String::as_str).collect();
    allowed.sort_unstable();

    vec![Issue::error(
        "frontmatter",
        format!(
            "Unexpected frontmatter properties: {}. Allowed: {}",
            unexpected.join(", "),
            allowed.join(", ")
        ),
    )]
}

/// Validate the skill `name` field
pub fn check_name(metadata: &Metadata, config: &SchemaConfig) -> Vec<Issue> {
    let mut issues = Vec::new();

    let name = match metadata.get("name") {
        None | Some(MetadataValue::Null) => {
            issues.push(Issue::error("name", "Required field 'name' is missing"));
            return issues;
        }
        Some(MetadataValue::String(s)) if s.is_empty() => {
            issues.push(Issue::error("name", "Required field 'name' is missing"));
            return issues;
        }
        Some(MetadataValue::String(s)) => s,
        Some(other) => {
            issues.push(Issue::error(
                "name",
                format!("Field 'name' must be a string, got {}", other.type_name()),
            ));
            return issues;
        }
    };

    // Length check runs independently of the format diagnosis
    let length = name.chars().count();
    if length > config.name_max_length {
        issues.push(Issue::error(
            "name",
            format!(
                "Field 'name' exceeds {} characters (got {})",
                config.name_max_length, length
            ),
        ));
    }

    // Format diagnosis: first matching cause wins. A value failing the
    // pattern only through a leading or trailing hyphen matches no cause
    // and draws no issue.
    if !NAME_PATTERN.is_match(name) {
        if *name != name.to_lowercase() {
            issues.push(Issue::error("name", "Field 'name' must be lowercase"));
        } else if name.contains(' ') {
            issues.push(Issue::error("name", "Field 'name' cannot contain spaces (use hyphens)"));
        } else if name.contains('_') {
            issues.push(Issue::warning(
                "name",
                "Field 'name' uses underscores (prefer hyphens for consistency)",
            ));
        } else if !NAME_CHARSET.is_match(name) {
            issues.push(Issue::error(
                "name",
                "Field 'name' must contain only lowercase letters, numbers, and hyphens",
            ));
        }
    }

    let lowered = name.to_lowercase();
    for reserved in &config.reserved_words {
        if lowered.contains(reserved.as_str()) {
            issues.push(Issue::error(
                "name",
                format!("Field 'name' cannot contain reserved word '{reserved}'"),
            ));
        }
    }

    if name.contains('<') || name.contains('>') {
        issues.push(Issue::error("name", "Field 'name' cannot contain XML tags"));
    }

    issues
}

/// Validate the skill `description` field
pub fn check_description(metadata: &Metadata, config: &SchemaConfig) -> Vec<Issue> {
    let mut issues = Vec::new();

    let description = match metadata.get("description") {
        None | Some(MetadataValue::Null) => {
            issues.push(Issue::error("description", "Required field 'description' is missing"));
            return issues;
        }
        Some(MetadataValue::String(s)) if s.is_empty() => {
            issues.push(Issue::error("description", "Required field 'description' is missing"));
            return issues;
        }
        Some(MetadataValue::String(s)) => s,
        Some(other) => {
            issues.push(Issue::error(
                "description",
                format!("Field 'description' must be a string, got {}", other.type_name()),
            ));
            return issues;
        }
    };

    if description.trim().is_empty() {
        issues.push(Issue::error("description", "Field 'description' cannot be empty"));
        return issues;
    }

    let length = description.chars().count();
    if length > config.description_max_length {
        issues.push(Issue::error(
            "description",
            format!(
                "Field 'description' exceeds {} characters (got {})",
                config.description_max_length, length
            ),
        ));
    }

    if description.contains('<') || description.contains('>') {
        issues.push(Issue::error("description", "Field 'description' cannot contain XML tags"));
    }

    // Quality warnings are independent of the blocking checks above
    if length < config.description_min_length {
        issues.push(Issue::warning(
            "description",
            "Field 'description' is quite short - consider adding more detail",
        ));
    }

    let lowered = description.to_lowercase();
    let has_trigger =
        config.trigger_phrases.iter().any(|phrase| lowered.contains(phrase.as_str()));
    if !has_trigger {
        issues.push(Issue::warning(
            "description",
            "Description lacks trigger phrases - consider explaining when to use this skill",
        ));
    }

    issues
}

/// Validate the markdown body content
pub fn check_body(body: &str, config: &SchemaConfig) -> Vec<Issue> {
    let mut issues = Vec::new();

    if body.trim().is_empty() {
        issues.push(Issue::error("body", "Skill body content is empty"));
        return issues;
    }

    let word_count = body.split_whitespace().count();
    if word_count < config.body_min_words {
        issues.push(Issue::warning(
            "body",
            format!("Skill body is quite short ({word_count} words) - consider adding more detail"),
        ));
    } else if word_count > config.body_max_words {
        issues.push(Issue::warning(
            "body",
            format!(
                "Skill body is very long ({word_count} words) - consider moving details to references/"
            ),
        ));
    }

    let lowered = body.to_lowercase();
    let has_guidance =
        config.example_markers.iter().any(|marker| lowered.contains(marker.as_str()));
    if !has_guidance {
        issues.push(Issue::warning(
            "body",
            "No examples or task/workflow guidance found - consider adding short examples or task steps",
        ));
    }

    issues
}
