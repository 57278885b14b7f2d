//! Spacing between CJK and Latin text.
//!
//! Inserts one space wherever a CJK character touches a Latin letter, a digit
//! or one of `` ` `` `$` `%` `#`. Works on rendered HTML: tag markup is copied
//! verbatim and `<pre>`/`<code>` elements are skipped with their contents.

/// Apply CJK spacing to rendered HTML.
///
/// ```
/// use ink_renderer::autospace;
///
/// assert_eq!(autospace("<p>使用Rust编写</p>"), "<p>使用 Rust 编写</p>");
/// assert_eq!(autospace("<code>变量x</code>"), "<code>变量x</code>");
/// ```
#[must_use]
pub fn autospace(html: &str) -> String {
    let mut out = String::with_capacity(html.len() + html.len() / 16);
    let mut prev: Option<char> = None;
    let mut rest = html;

    while let Some(c) = rest.chars().next() {
        if c == '<' {
            let skip = skipped_len(rest);
            out.push_str(&rest[..skip]);
            rest = &rest[skip..];
            prev = None;
            continue;
        }

        if let Some(p) = prev
            && needs_space(p, c)
        {
            out.push(' ');
        }
        out.push(c);
        prev = Some(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Length of the markup at the start of `s` (which begins with `<`).
///
/// A `<pre>` or `<code>` element spans through its closing tag. Any other tag
/// spans through the next `>`. A `<` that does not open markup spans one byte.
fn skipped_len(s: &str) -> usize {
    for element in ["pre", "code"] {
        if opens_element(s, element) {
            let closing = format!("</{element}>");
            return s
                .find(&closing)
                .map_or(s.len(), |pos| pos + closing.len());
        }
    }

    let is_markup = s[1..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'));
    if !is_markup {
        return 1;
    }
    s.find('>').map_or(s.len(), |pos| pos + 1)
}

fn opens_element(s: &str, name: &str) -> bool {
    s[1..].strip_prefix(name).is_some_and(|after| {
        after
            .chars()
            .next()
            .is_some_and(|c| c == '>' || c.is_whitespace())
    })
}

fn needs_space(a: char, b: char) -> bool {
    (is_cjk(a) && is_latin(b)) || (is_latin(a) && is_cjk(b))
}

fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{2e80}'..='\u{2fff}'
            | '\u{3040}'..='\u{309f}'
            | '\u{30a0}'..='\u{30ff}'
            | '\u{3400}'..='\u{4dbf}'
            | '\u{4e00}'..='\u{9fff}'
            | '\u{f900}'..='\u{faff}'
    )
}

fn is_latin(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '`' | '$' | '%' | '#')
}
