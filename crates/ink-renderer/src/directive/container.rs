//! Container directives.
//!
//! Container directives use triple-colon syntax:
//!
//! ```text
//! ::: tip[Optional title]
//! Body markdown
//! :::
//! ```
//!
//! The block closes at the first later line holding only `:::`. Containers do
//! not nest. A container with an unknown kind or without a closing line is
//! left as literal text.

use std::fmt::Write;

use crate::locale::Locale;

const ICON_TIP: &str = r#"<svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M15 14c.2-1 .7-1.7 1.5-2.5 1-.9 1.5-2.2 1.5-3.5A6 6 0 0 0 6 8c0 1 .2 2.2 1.5 3.5.7.7 1.3 1.5 1.5 2.5"/><path d="M9 18h6"/><path d="M10 22h4"/></svg>"#;
const ICON_WARNING: &str = r#"<svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="m21.73 18-8-14a2 2 0 0 0-3.48 0l-8 14A2 2 0 0 0 4 21h16a2 2 0 0 0 1.73-3"/><path d="M12 9v4"/><path d="M12 17h.01"/></svg>"#;
const ICON_DANGER: &str = r#"<svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="10"/><path d="m15 9-6 6"/><path d="m9 9 6 6"/></svg>"#;
const ICON_INFO: &str = r#"<svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="10"/><path d="M12 16v-4"/><path d="M12 8h.01"/></svg>"#;

/// Container kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    Tip,
    Warning,
    Danger,
    Info,
    /// Collapsible disclosure.
    Details,
}

impl ContainerKind {
    /// Parse a kind name as written after `:::`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tip" => Some(Self::Tip),
            "warning" => Some(Self::Warning),
            "danger" => Some(Self::Danger),
            "info" => Some(Self::Info),
            "details" => Some(Self::Details),
            _ => None,
        }
    }

    /// Kind name, used in CSS classes.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Tip => "tip",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Info => "info",
            Self::Details => "details",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Tip => ICON_TIP,
            Self::Warning => ICON_WARNING,
            Self::Danger => ICON_DANGER,
            Self::Info => ICON_INFO,
            Self::Details => "",
        }
    }
}

/// A parsed `::: kind[title]` opening line.
#[derive(Debug, PartialEq, Eq)]
struct Opening<'a> {
    kind: ContainerKind,
    title: Option<&'a str>,
}

/// Expand every container block into an HTML island.
///
/// The body is emitted between blank lines so the markdown parser still
/// processes it.
#[must_use]
pub fn expand_containers(markdown: &str, locale: Locale) -> String {
    let lines: Vec<&str> = markdown.split_inclusive('\n').collect();
    let mut out = String::with_capacity(markdown.len());
    let mut i = 0;

    while i < lines.len() {
        let Some(opening) = parse_opening(lines[i]) else {
            out.push_str(lines[i]);
            i += 1;
            continue;
        };

        let Some(offset) = lines[i + 1..].iter().position(|line| is_closing(line)) else {
            tracing::warn!(
                line = i + 1,
                kind = opening.kind.name(),
                "Unterminated container left as text"
            );
            out.push_str(lines[i]);
            i += 1;
            continue;
        };
        let close = i + 1 + offset;

        let body = lines[i + 1..close].concat();
        let title = opening
            .title
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| locale.container_title(opening.kind));
        render_container(opening.kind, title, body.trim(), &mut out);

        let closing_line = lines[close];
        out.push_str(&closing_line[closing_line.trim_end_matches(['\r', '\n']).len()..]);
        i = close + 1;
    }

    out
}

fn render_container(kind: ContainerKind, title: &str, body: &str, out: &mut String) {
    if kind == ContainerKind::Details {
        let _ = write!(
            out,
            "<details class=\"ink-details\"><summary>{title}</summary>\n\n{body}\n\n</details>"
        );
    } else {
        let _ = write!(
            out,
            "<div class=\"ink-container ink-{}\"><p class=\"container-title\">{}{title}</p>\n\n{body}\n\n</div>",
            kind.name(),
            kind.icon()
        );
    }
}

/// Parse `:::`, optional whitespace, a kind, an optional `[title]`, then only
/// whitespace to the end of the line.
fn parse_opening(line: &str) -> Option<Opening<'_>> {
    let rest = line.strip_prefix(":::")?.trim_start();
    let name_len = rest
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(rest.len());
    let kind = ContainerKind::from_name(&rest[..name_len])?;
    let mut rest = &rest[name_len..];

    let mut title = None;
    if let Some(bracketed) = rest.strip_prefix('[') {
        let end = bracketed.find(']')?;
        title = Some(&bracketed[..end]);
        rest = &bracketed[end + 1..];
    }

    rest.trim().is_empty().then_some(Opening { kind, title })
}

fn is_closing(line: &str) -> bool {
    line.strip_prefix(":::")
        .is_some_and(|rest| rest.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_opening() {
        assert_eq!(
            parse_opening("::: tip\n"),
            Some(Opening {
                kind: ContainerKind::Tip,
                title: None
            })
        );
        assert_eq!(
            parse_opening(":::warning[Heads up]  \n"),
            Some(Opening {
                kind: ContainerKind::Warning,
                title: Some("Heads up")
            })
        );
        assert_eq!(parse_opening("::: note\n"), None);
        assert_eq!(parse_opening("::: tip extra\n"), None);
        assert_eq!(parse_opening(":::\n"), None);
        assert_eq!(parse_opening(" ::: tip\n"), None);
    }

    #[test]
    fn test_tip_with_custom_title() {
        let output = expand_containers("::: tip[Custom]\nBody **bold**\n:::\n", Locale::Chinese);
        assert!(output.starts_with(r#"<div class="ink-container ink-tip"><p class="container-title"><svg"#));
        assert!(output.contains("</svg>Custom</p>\n\nBody **bold**\n\n</div>\n"));
    }

    #[test]
    fn test_default_titles_are_localized() {
        let zh = expand_containers("::: danger\nx\n:::", Locale::Chinese);
        assert!(zh.contains("</svg>危险</p>"));
        let en = expand_containers("::: danger\nx\n:::", Locale::English);
        assert!(en.contains("</svg>Danger</p>"));
    }

    #[test]
    fn test_empty_brackets_use_default_title() {
        let output = expand_containers("::: info[]\nx\n:::\n", Locale::English);
        assert!(output.contains("</svg>Info</p>"));
    }

    #[test]
    fn test_details() {
        let output = expand_containers("::: details[Show more]\n\n  hidden  \n\n:::\n", Locale::English);
        assert_eq!(
            output,
            "<details class=\"ink-details\"><summary>Show more</summary>\n\nhidden\n\n</details>\n"
        );
    }

    #[test]
    fn test_surrounding_text_is_kept() {
        let output = expand_containers("before\n::: details\nx\n:::\nafter\n", Locale::English);
        assert_eq!(
            output,
            "before\n<details class=\"ink-details\"><summary>Details</summary>\n\nx\n\n</details>\nafter\n"
        );
    }

    #[test]
    fn test_unterminated_is_literal() {
        let input = "::: tip\nnever closed\n";
        assert_eq!(expand_containers(input, Locale::English), input);
    }

    #[test]
    fn test_unknown_kind_is_literal() {
        let input = "::: note\nbody\n:::\n";
        assert_eq!(expand_containers(input, Locale::English), input);
    }

    #[test]
    fn test_no_nesting_first_closer_wins() {
        let input = "::: tip\n::: info\ninner\n:::\nouter\n:::\n";
        let output = expand_containers(input, Locale::English);
        assert!(output.contains("<p class=\"container-title\">"));
        assert!(output.contains("\n\n::: info\ninner\n\n</div>\nouter\n:::\n"));
    }
}
