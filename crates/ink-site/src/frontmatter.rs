//! Front matter support.
//!
//! A document may start with a YAML block between two `---` lines:
//!
//! ```text
//! ---
//! title: Getting Started
//! order: 1
//! ---
//! # Body
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

/// Sort key for pages without an explicit `order`.
pub const DEFAULT_ORDER: f64 = 999.0;

/// Error type for front matter parsing.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// YAML parsing error.
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The block parsed, but not to a mapping.
    #[error("Front matter must be a mapping")]
    NotMapping,
}

/// Splits a metadata block from a document body.
pub trait FrontMatterParser {
    /// Split `raw` into its front matter and the remaining body.
    ///
    /// A document without a metadata block yields empty front matter and the
    /// whole text as body.
    fn split(&self, raw: &str) -> Result<(Frontmatter, String), FrontMatterError>;
}

/// `---`-delimited YAML front matter.
#[derive(Clone, Copy, Debug, Default)]
pub struct YamlFrontMatter;

impl FrontMatterParser for YamlFrontMatter {
    fn split(&self, raw: &str) -> Result<(Frontmatter, String), FrontMatterError> {
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
        let Some((yaml, body)) = split_block(raw) else {
            return Ok((Frontmatter::default(), raw.to_owned()));
        };

        if yaml.trim().is_empty() {
            return Ok((Frontmatter::default(), body.to_owned()));
        }

        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Object(map) => Ok((Frontmatter(map), body.to_owned())),
            Value::Null => Ok((Frontmatter::default(), body.to_owned())),
            _ => Err(FrontMatterError::NotMapping),
        }
    }
}

/// Locate the `---` block at the start of `raw`. Returns `(yaml, body)`.
fn split_block(raw: &str) -> Option<(&str, &str)> {
    let mut lines = raw.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == "---" {
            return Some((&raw[yaml_start..offset], &raw[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parsed front matter: a string-keyed mapping of JSON values.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Frontmatter(Map<String, Value>);

impl Frontmatter {
    /// Raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Non-empty string value for a key.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.get_str("description")
    }

    #[must_use]
    pub fn layout(&self) -> Option<&str> {
        self.get_str("layout")
    }

    /// Sidebar sort key. Defaults to [`DEFAULT_ORDER`]; numeric strings are accepted.
    #[must_use]
    pub fn order(&self) -> f64 {
        match self.get("order") {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(DEFAULT_ORDER),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(DEFAULT_ORDER),
            _ => DEFAULT_ORDER,
        }
    }

    /// The `hero` object, when present and not null or `false`.
    #[must_use]
    pub fn hero(&self) -> Option<&Value> {
        self.get("hero")
            .filter(|hero| !matches!(hero, Value::Null | Value::Bool(false)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Frontmatter {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
