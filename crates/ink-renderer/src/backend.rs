//! Render backend trait.

use std::borrow::Cow;

/// Format-specific rendering hooks.
///
/// [`MarkdownRenderer`](crate::MarkdownRenderer) handles the elements whose
/// markup never changes (paragraphs, lists, inline formatting) and delegates
/// the rest to a backend.
pub trait RenderBackend {
    /// Render a fenced or indented code block. `content` is unescaped.
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Render a heading. `html` is the already-rendered inline content.
    fn heading(level: u8, id: &str, html: &str, out: &mut String);

    /// Open a table (before `<thead>`).
    fn table_start(out: &mut String) {
        out.push_str("<table>");
    }

    /// Close a table (after `</tbody>`).
    fn table_end(out: &mut String) {
        out.push_str("</table>");
    }

    /// Render an image. `src` has already gone through [`Self::image_src`].
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Resolve an image source against the site base path.
    fn image_src<'a>(src: &'a str, _base_path: &str) -> Cow<'a, str> {
        Cow::Borrowed(src)
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn hard_break(out: &mut String) {
        out.push_str("<br />");
    }

    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr />");
    }

    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}
