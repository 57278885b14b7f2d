//! Template tokenizer.
//!
//! Splits a template into literal text and `{{ ... }}` tags. Tags keep a slice
//! of their source so the parser can fall back to literal text when a block
//! tag turns out to be unbalanced.

/// Block tag kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BlockKind {
    Each,
    If,
    Unless,
}

impl BlockKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "each" => Some(Self::Each),
            "if" => Some(Self::If),
            "unless" => Some(Self::Unless),
            _ => None,
        }
    }
}

/// A lexical token borrowed from the template source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Literal text between tags.
    Text(&'a str),
    /// `{{path}}` (escaped) or `{{{path}}}` (raw).
    Var {
        path: &'a str,
        raw: bool,
        src: &'a str,
    },
    /// `{{#each path}}`, `{{#if path}}`, `{{#unless path}}`.
    Open {
        kind: BlockKind,
        path: &'a str,
        src: &'a str,
    },
    /// `{{else}}` or `{{#else}}`.
    Else { src: &'a str },
    /// `{{/each}}`, `{{/if}}`, `{{/unless}}`.
    Close { kind: BlockKind, src: &'a str },
}

impl<'a> Token<'a> {
    /// Source text of the token, used when a block tag is emitted literally.
    pub(crate) fn source(&self) -> &'a str {
        match *self {
            Self::Text(src)
            | Self::Var { src, .. }
            | Self::Open { src, .. }
            | Self::Else { src }
            | Self::Close { src, .. } => src,
        }
    }
}

/// Tokenize a template.
///
/// An opening `{{` without a closing `}}` is literal text, as is any tag whose
/// content is not recognized (e.g. `{{#foo}}` or `{{ 1 + 2 }}`).
pub(crate) fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        let (raw, open_len, close) = if rest[start..].starts_with("{{{") {
            (true, 3, "}}}")
        } else {
            (false, 2, "}}")
        };

        let inner_start = start + open_len;
        let Some(inner_len) = rest[inner_start..].find(close) else {
            break;
        };
        let tag_end = inner_start + inner_len + close.len();

        if start > 0 {
            tokens.push(Token::Text(&rest[..start]));
        }

        let src = &rest[start..tag_end];
        let inner = rest[inner_start..inner_start + inner_len].trim();

        if raw {
            tokens.push(if is_path(inner) {
                Token::Var {
                    path: inner,
                    raw: true,
                    src,
                }
            } else {
                Token::Text(src)
            });
        } else {
            tokens.push(classify(inner, src));
        }
        rest = &rest[tag_end..];
    }

    if !rest.is_empty() {
        tokens.push(Token::Text(rest));
    }
    tokens
}

/// Classify the trimmed content of a `{{ ... }}` tag.
fn classify<'a>(inner: &'a str, src: &'a str) -> Token<'a> {
    if inner == "else" || inner == "#else" {
        return Token::Else { src };
    }

    if let Some(open) = inner.strip_prefix('#') {
        let (name, path) = open.split_once(char::is_whitespace).unwrap_or((open, ""));
        return match BlockKind::from_name(name) {
            Some(kind) => Token::Open {
                kind,
                path: path.trim(),
                src,
            },
            None => Token::Text(src),
        };
    }

    if let Some(close) = inner.strip_prefix('/') {
        return match BlockKind::from_name(close.trim()) {
            Some(kind) => Token::Close { kind, src },
            None => Token::Text(src),
        };
    }

    if !is_path(inner) {
        return Token::Text(src);
    }
    Token::Var {
        path: inner,
        raw: false,
        src,
    }
}

/// `.` or dot-separated segments of ASCII letters, digits and `_`.
fn is_path(inner: &str) -> bool {
    inner == "."
        || inner.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'_')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(tokenize("hello"), vec![Token::Text("hello")]);
    }

    #[test]
    fn test_escaped_and_raw_vars() {
        assert_eq!(
            tokenize("a{{ x }}b{{{y}}}"),
            vec![
                Token::Text("a"),
                Token::Var {
                    path: "x",
                    raw: false,
                    src: "{{ x }}"
                },
                Token::Text("b"),
                Token::Var {
                    path: "y",
                    raw: true,
                    src: "{{{y}}}"
                },
            ]
        );
    }

    #[test]
    fn test_block_tags() {
        let tokens = tokenize("{{#each items}}{{else}}{{#else}}{{/each}}");
        assert_eq!(
            tokens,
            vec![
                Token::Open {
                    kind: BlockKind::Each,
                    path: "items",
                    src: "{{#each items}}"
                },
                Token::Else { src: "{{else}}" },
                Token::Else { src: "{{#else}}" },
                Token::Close {
                    kind: BlockKind::Each,
                    src: "{{/each}}"
                },
            ]
        );
    }

    #[test]
    fn test_unknown_block_is_text() {
        assert_eq!(
            tokenize("{{#with x}}"),
            vec![Token::Text("{{#with x}}")]
        );
        assert_eq!(tokenize("{{/with}}"), vec![Token::Text("{{/with}}")]);
    }

    #[test]
    fn test_non_path_tag_is_text() {
        assert_eq!(tokenize("{{ 1 + 2 }}"), vec![Token::Text("{{ 1 + 2 }}")]);
        assert_eq!(tokenize("{{{a..b}}}"), vec![Token::Text("{{{a..b}}}")]);
        assert_eq!(tokenize("{{}}"), vec![Token::Text("{{}}")]);
        assert!(matches!(
            tokenize("{{ page.items.0 }}").as_slice(),
            [Token::Var { path: "page.items.0", .. }]
        ));
    }

    #[test]
    fn test_unterminated_tag_is_text() {
        assert_eq!(tokenize("a {{b"), vec![Token::Text("a {{b")]);
    }
}
