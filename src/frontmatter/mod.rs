//! Frontmatter extraction for skill documents
//!
//! Architecture: Service Layer - Extraction coordinates delimiter scanning and block parsing
//! - The extractor splits a document into a metadata mapping and a verbatim body
//! - Block parsing sits behind the FrontmatterParser trait with two implementations,
//!   selected once at startup; downstream code never branches on which one is active
//! - Structural failures are terminal: no rule evaluation happens after them

pub mod fallback;

use crate::config::ParserKind;
use serde_yaml::Value as YamlValue;

pub use fallback::FallbackParser;

/// A value carried by one frontmatter key
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    String(String),
    Number(String),
    Bool(bool),
    Sequence(Vec<MetadataValue>),
    Mapping(Metadata),
    Null,
}

impl MetadataValue {
    /// The string content, when this value is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Type name used in validation messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Null => "null",
        }
    }
}

/// An ordered mapping of frontmatter keys to values; keys are unique
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: Vec<(String, MetadataValue)>,
}

impl Metadata {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key, replacing any earlier value for the same key in place
    pub fn insert(&mut self, key: impl Into<String>, value: MetadataValue) {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Look up a key
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Keys in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, MetadataValue)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (String, MetadataValue)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

/// Structural failures preventing a document from being validated at all
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// Document does not begin with the opening delimiter line
    #[error("Missing YAML frontmatter (file must start with ---)")]
    MissingFrontmatter,

    /// Opening delimiter found but no closing delimiter line
    #[error("Invalid YAML frontmatter (missing closing ---)")]
    UnterminatedFrontmatter,

    /// Block is present but malformed
    #[error("Invalid YAML in frontmatter: {detail}")]
    Parse { detail: String },

    /// Block parses to something other than a mapping
    #[error("Frontmatter must be a YAML mapping")]
    NotAMapping,
}

/// Capability interface for parsing the text between the delimiter lines
pub trait FrontmatterParser: Send + Sync {
    /// Parse the block text into a mapping; an empty or null block is an empty mapping
    fn parse(&self, block: &str) -> Result<Metadata, ExtractError>;

    /// Advisory surfaced once per validation when this parser has restricted capability
    fn advisory(&self) -> Option<&'static str> {
        None
    }
}

/// Full YAML parser understanding quoted strings, sequences, and nested mappings
#[derive(Debug, Default)]
pub struct StrictYamlParser;

impl FrontmatterParser for StrictYamlParser {
    fn parse(&self, block: &str) -> Result<Metadata, ExtractError> {
        if block.trim().is_empty() {
            return Ok(Metadata::new());
        }

        let value: YamlValue = serde_yaml::from_str(block)
            .map_err(|e| ExtractError::Parse { detail: e.to_string() })?;

        match value {
            YamlValue::Null => Ok(Metadata::new()),
            YamlValue::Mapping(mapping) => {
                let mut metadata = Metadata::new();
                for (key, value) in mapping {
                    metadata.insert(yaml_key_to_string(&key), convert_yaml_value(value));
                }
                Ok(metadata)
            }
            _ => Err(ExtractError::NotAMapping),
        }
    }
}

fn yaml_key_to_string(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        other => serde_yaml::to_string(other).unwrap_or_default().trim().to_string(),
    }
}

fn convert_yaml_value(value: YamlValue) -> MetadataValue {
    match value {
        YamlValue::Null => MetadataValue::Null,
        YamlValue::Bool(b) => MetadataValue::Bool(b),
        YamlValue::Number(n) => MetadataValue::Number(n.to_string()),
        YamlValue::String(s) => MetadataValue::String(s),
        YamlValue::Sequence(items) => {
            MetadataValue::Sequence(items.into_iter().map(convert_yaml_value).collect())
        }
        YamlValue::Mapping(mapping) => {
            let mut nested = Metadata::new();
            for (key, value) in mapping {
                nested.insert(yaml_key_to_string(&key), convert_yaml_value(value));
            }
            MetadataValue::Mapping(nested)
        }
        YamlValue::Tagged(tagged) => {
            let tagged = *tagged;
            convert_yaml_value(tagged.value)
        }
    }
}

/// Splits a skill document into its frontmatter mapping and body
pub struct FrontmatterExtractor {
    parser: Box<dyn FrontmatterParser>,
    kind: ParserKind,
}

impl FrontmatterExtractor {
    /// Create an extractor with the parser selected by configuration
    pub fn new(kind: ParserKind) -> Self {
        let parser: Box<dyn FrontmatterParser> = match kind {
            ParserKind::Strict => Box::new(StrictYamlParser),
            ParserKind::Fallback => Box::new(FallbackParser::new()),
        };
        Self { parser, kind }
    }

    /// Which parser implementation is active
    pub fn parser_kind(&self) -> ParserKind {
        self.kind
    }

    /// Advisory text for the active parser, if it has restricted capability
    pub fn advisory(&self) -> Option<&'static str> {
        self.parser.advisory()
    }

    /// Extract the frontmatter mapping and the verbatim body from a document
    ///
    /// A delimiter line is a line that is exactly `---` (a trailing carriage
    /// return is tolerated for CRLF documents). The body is everything after
    /// the closing delimiter line, byte for byte.
    pub fn extract(&self, content: &str) -> Result<(Metadata, String), ExtractError> {
        let mut offset = 0;
        let mut opened = false;
        let mut block_start = 0;
        let mut block_bounds = None;

        for line in content.split_inclusive('\n') {
            let text = line.strip_suffix('\n').unwrap_or(line);
            let text = text.strip_suffix('\r').unwrap_or(text);

            if !opened {
                if text != "---" {
                    return Err(ExtractError::MissingFrontmatter);
                }
                opened = true;
                block_start = offset + line.len();
            } else if text == "---" {
                block_bounds = Some((offset, offset + line.len()));
                break;
            }

            offset += line.len();
        }

        if !opened {
            return Err(ExtractError::MissingFrontmatter);
        }

        let (block_end, body_start) =
            block_bounds.ok_or(ExtractError::UnterminatedFrontmatter)?;

        let metadata = self.parser.parse(&content[block_start..block_end])?;
        let body = content[body_start..].to_string();

        Ok((metadata, body))
    }
}

impl Default for FrontmatterExtractor {
    fn default() -> Self {
        Self::new(ParserKind::Strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(content: &str) -> Result<(Metadata, String), ExtractError> {
        FrontmatterExtractor::default().extract(content)
    }

    #[test]
    fn test_extracts_mapping_and_body() {
        let content = "---\nname: my-skill\ndescription: Use this when doing X.\n---\n\n# Body\n";
        let (metadata, body) = extract(content).unwrap();

        assert_eq!(metadata.get("name").unwrap().as_str(), Some("my-skill"));
        assert_eq!(
            metadata.get("description").unwrap().as_str(),
            Some("Use this when doing X.")
        );
        assert_eq!(body, "\n# Body\n");
    }

    #[test]
    fn test_body_is_verbatim() {
        let content = "---\nname: x\n---\n  leading spaces\n\ntrailing\n\n";
        let (_, body) = extract(content).unwrap();
        assert_eq!(body, "  leading spaces\n\ntrailing\n\n");
    }

    #[test]
    fn test_missing_opening_delimiter() {
        assert_eq!(
            extract("# Just markdown\n").unwrap_err(),
            ExtractError::MissingFrontmatter
        );
        assert_eq!(extract("").unwrap_err(), ExtractError::MissingFrontmatter);
        // Leading whitespace disqualifies the delimiter line
        assert_eq!(
            extract(" ---\nname: x\n---\n").unwrap_err(),
            ExtractError::MissingFrontmatter
        );
    }

    #[test]
    fn test_unterminated_block() {
        assert_eq!(
            extract("---\nname: x\n\nNo closing delimiter\n").unwrap_err(),
            ExtractError::UnterminatedFrontmatter
        );
        assert_eq!(extract("---\n").unwrap_err(), ExtractError::UnterminatedFrontmatter);
    }

    #[test]
    fn test_empty_block_is_empty_mapping() {
        let (metadata, body) = extract("---\n---\nbody\n").unwrap();
        assert!(metadata.is_empty());
        assert_eq!(body, "body\n");

        let (metadata, _) = extract("---\n\n---\n").unwrap();
        assert!(metadata.is_empty());
    }

    #[test]
    fn test_non_mapping_block_is_error() {
        assert_eq!(
            extract("---\n- just\n- a list\n---\n").unwrap_err(),
            ExtractError::NotAMapping
        );
        assert_eq!(extract("---\nbare scalar\n---\n").unwrap_err(), ExtractError::NotAMapping);
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = extract("---\nname: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
    }

    #[test]
    fn test_quoted_strings_and_sequences() {
        let content =
            "---\nname: \"quoted-name\"\nallowed-tools:\n  - Read\n  - Grep\n---\nbody\n";
        let (metadata, _) = extract(content).unwrap();

        assert_eq!(metadata.get("name").unwrap().as_str(), Some("quoted-name"));
        match metadata.get("allowed-tools").unwrap() {
            MetadataValue::Sequence(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].as_str(), Some("Read"));
            }
            other => panic!("expected sequence, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_mapping_and_scalar_types() {
        let content = "---\nmetadata:\n  author: someone\nname: 42\nflag: true\n---\nbody\n";
        let (metadata, _) = extract(content).unwrap();

        assert!(matches!(metadata.get("metadata"), Some(MetadataValue::Mapping(_))));
        assert_eq!(metadata.get("name"), Some(&MetadataValue::Number("42".to_string())));
        assert_eq!(metadata.get("flag"), Some(&MetadataValue::Bool(true)));
    }

    #[test]
    fn test_crlf_delimiters() {
        let content = "---\r\nname: x\r\n---\r\nbody\r\n";
        let (metadata, body) = extract(content).unwrap();
        assert_eq!(metadata.get("name").unwrap().as_str(), Some("x"));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_keys_preserve_document_order() {
        let content = "---\nzeta: 1\nalpha: 2\nmid: 3\n---\nbody\n";
        let (metadata, _) = extract(content).unwrap();
        let keys: Vec<_> = metadata.keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }
}
