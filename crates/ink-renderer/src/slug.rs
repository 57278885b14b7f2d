//! Heading slugs.

/// Remove `<...>` tags from a string.
///
/// A `<` with no closing `>` is kept as text.
#[must_use]
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find('<') {
        match rest[open + 1..].find('>') {
            Some(close) if close > 0 => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 2..];
            }
            _ => {
                out.push_str(&rest[..=open]);
                rest = &rest[open + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Derive an anchor id from heading text.
///
/// Lower-cases, strips tags, keeps ASCII word characters, CJK ideographs,
/// whitespace and hyphens, then joins whitespace runs with single hyphens.
/// Leading and trailing hyphens are dropped. Idempotent.
///
/// # Example
///
/// ```
/// use ink_renderer::slugify;
///
/// assert_eq!(slugify("Getting Started!"), "getting-started");
/// assert_eq!(slugify("安装 Ink"), "安装-ink");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = strip_tags(&text.to_lowercase());
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for c in lowered.chars() {
        if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        } else if c.is_ascii_alphanumeric() || c == '_' || is_cjk_ideograph(c) {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        }
    }

    slug
}

fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slug() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("API Reference (v2)"), "api-reference-v2");
    }

    #[test]
    fn test_collapses_separators() {
        assert_eq!(slugify("Step 1 - Install"), "step-1-install");
        assert_eq!(slugify("  padded  "), "padded");
        assert_eq!(slugify("a---b"), "a-b");
    }

    #[test]
    fn test_strips_tags() {
        assert_eq!(slugify("Use <code>ink build</code>"), "use-ink-build");
    }

    #[test]
    fn test_keeps_cjk() {
        assert_eq!(slugify("快速开始"), "快速开始");
        assert_eq!(slugify("配置 Config 文件"), "配置-config-文件");
    }

    #[test]
    fn test_drops_non_ascii_letters() {
        assert_eq!(slugify("Café"), "caf");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "Hello World",
            "  Step 1 - Install ",
            "配置 Config 文件",
            "<b>Bold</b> move",
            "snake_case & kebab-case",
            "---",
            "",
        ] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<em>a</em> < b"), "a < b");
        assert_eq!(strip_tags("x <> y"), "x <> y");
    }
}
