//! Component argument parsing.
//!
//! Parses the attribute list of a `{% name ... %}` tag: `key="value"` pairs
//! and an optional bare quoted label (`{% tab "macOS" %}`).

use std::collections::HashMap;

/// Parsed arguments of a component tag.
///
/// # Example
///
/// ```
/// use ink_renderer::directive::ComponentArgs;
///
/// let args = ComponentArgs::parse(r#"text="Beta" type='warning' size=lg"#);
/// assert_eq!(args.get("text"), Some("Beta"));
/// assert_eq!(args.get("type"), Some("warning"));
/// assert_eq!(args.get_or("missing", "tip"), "tip");
///
/// let tab = ComponentArgs::parse(r#""Linux""#);
/// assert_eq!(tab.label.as_deref(), Some("Linux"));
/// ```
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ComponentArgs {
    /// First bare quoted string, if any.
    pub label: Option<String>,
    /// Key-value attributes.
    pub attrs: HashMap<String, String>,
}

impl ComponentArgs {
    /// Parse an attribute string.
    ///
    /// Bare words and malformed pairs are skipped. A repeated key keeps its
    /// first value.
    #[must_use]
    pub fn parse(attrs_str: &str) -> Self {
        let mut args = Self::default();
        let mut remaining = attrs_str.trim();

        while !remaining.is_empty() {
            if let Some(stripped) = remaining.strip_prefix('"') {
                // Bare label: "value"
                let Some(end) = stripped.find('"') else {
                    break;
                };
                if args.label.is_none() {
                    args.label = Some(stripped[..end].to_owned());
                }
                remaining = &stripped[end + 1..];
            } else if let Some((key, value, rest)) = parse_key_value(remaining) {
                args.attrs
                    .entry(key.to_owned())
                    .or_insert_with(|| value.to_owned());
                remaining = rest;
            } else {
                // Skip one unrecognized word
                let end = remaining
                    .find(char::is_whitespace)
                    .unwrap_or(remaining.len());
                remaining = &remaining[end..];
            }
            remaining = remaining.trim_start();
        }

        args
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Get an attribute value, or `default` when it is absent.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }
}

/// Parse a key-value pair from the start of the attributes string.
///
/// Supports: `key="value"`, `key='value'`, `key=value`
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let key_len = s.find(|c: char| c.is_whitespace() || c == '=')?;
    let key = &s[..key_len];
    let after_eq = s[key_len..].strip_prefix('=')?;

    if key.is_empty() {
        return None;
    }

    if let Some(stripped) = after_eq.strip_prefix('"') {
        let end_quote = stripped.find('"')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else if let Some(stripped) = after_eq.strip_prefix('\'') {
        let end_quote = stripped.find('\'')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else {
        // Unquoted value (until whitespace)
        let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
        Some((key, &after_eq[..end], &after_eq[end..]))
    }
}
