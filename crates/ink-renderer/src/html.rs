//! HTML backend for markdown rendering.
//!
//! Produces the markup the Ink theme styles: anchored headings, wrapped
//! tables, code blocks with a copy button and lazy-loaded figures.

use std::borrow::Cow;
use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::state::escape_html;

const SVG_COPY: &str = r#"<svg width="14" height="14" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><rect x="9" y="9" width="13" height="13" rx="2"/><path d="M5 15H4a2 2 0 0 1-2-2V4a2 2 0 0 1 2-2h9a2 2 0 0 1 2 2v1"/></svg>"#;

/// HTML render backend.
///
/// - Code blocks: `<div class="code-block">` with language label and copy button
/// - Headings: `id` plus a `#` self-link
/// - Tables: wrapped in `<div class="table-wrap">` for horizontal scrolling
/// - Images: `<figure>` with the alt text as caption, base-relative sources
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        out.push_str(r#"<div class="code-block">"#);
        if let Some(lang) = lang {
            let _ = write!(out, r#"<span class="code-lang">{}</span>"#, escape_html(lang));
        }
        let _ = write!(
            out,
            r#"<button class="code-copy" onclick="inkCopyCode(this)">{SVG_COPY}</button>"#
        );
        match lang {
            Some(lang) => {
                let _ = write!(
                    out,
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    escape_html(lang),
                    escape_html(content)
                );
            }
            None => {
                let _ = write!(out, "<pre><code>{}</code></pre>", escape_html(content));
            }
        }
        out.push_str("</div>");
    }

    fn heading(level: u8, id: &str, html: &str, out: &mut String) {
        let _ = write!(
            out,
            r##"<h{level} id="{id}"><a class="header-anchor" href="#{id}">#</a>{html}</h{level}>"##
        );
    }

    fn table_start(out: &mut String) {
        out.push_str(r#"<div class="table-wrap"><table>"#);
    }

    fn table_end(out: &mut String) {
        out.push_str("</table></div>");
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let _ = write!(
            out,
            r#"<figure class="ink-figure"><img src="{}" alt="{}""#,
            escape_html(src),
            escape_html(alt)
        );
        if !title.is_empty() {
            let _ = write!(out, r#" title="{}""#, escape_html(title));
        }
        out.push_str(r#" loading="lazy" />"#);
        if !alt.is_empty() {
            let _ = write!(out, "<figcaption>{}</figcaption>", escape_html(alt));
        }
        out.push_str("</figure>");
    }

    fn image_src<'a>(src: &'a str, base_path: &str) -> Cow<'a, str> {
        resolve_image_src(src, base_path)
    }
}

/// Resolve an image source against the site base path.
///
/// Absolute URLs (`http:`/`https:`) and `data:` URIs are kept. Anything else
/// is treated as site-root relative: `img/a.png` and `/img/a.png` both become
/// `{base}/img/a.png`.
fn resolve_image_src<'a>(src: &'a str, base_path: &str) -> Cow<'a, str> {
    if src.starts_with("http") || src.starts_with("data:") || src.starts_with("//") {
        return Cow::Borrowed(src);
    }
    Cow::Owned(format!(
        "{}/{}",
        base_path.trim_end_matches('/'),
        src.trim_start_matches('/')
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_code_block_with_language() {
        let mut out = String::new();
        HtmlBackend::code_block(Some("rust"), "if a < b {}", &mut out);
        assert!(out.starts_with(r#"<div class="code-block"><span class="code-lang">rust</span><button class="code-copy""#));
        assert!(out.ends_with(
            r#"<pre><code class="language-rust">if a &lt; b {}</code></pre></div>"#
        ));
    }

    #[test]
    fn test_code_block_without_language() {
        let mut out = String::new();
        HtmlBackend::code_block(None, "plain", &mut out);
        assert!(!out.contains("code-lang"));
        assert!(out.ends_with("<pre><code>plain</code></pre></div>"));
    }

    #[test]
    fn test_heading() {
        let mut out = String::new();
        HtmlBackend::heading(2, "setup", "Setup <code>ink</code>", &mut out);
        assert_eq!(
            out,
            r##"<h2 id="setup"><a class="header-anchor" href="#setup">#</a>Setup <code>ink</code></h2>"##
        );
    }

    #[test]
    fn test_table_wrapper() {
        let mut out = String::new();
        HtmlBackend::table_start(&mut out);
        HtmlBackend::table_end(&mut out);
        assert_eq!(out, r#"<div class="table-wrap"><table></table></div>"#);
    }

    #[test]
    fn test_image_with_caption() {
        let mut out = String::new();
        HtmlBackend::image("/docs/a.png", "Diagram", "", &mut out);
        assert_eq!(
            out,
            r#"<figure class="ink-figure"><img src="/docs/a.png" alt="Diagram" loading="lazy" /><figcaption>Diagram</figcaption></figure>"#
        );
    }

    #[test]
    fn test_image_with_title_and_no_alt() {
        let mut out = String::new();
        HtmlBackend::image("a.png", "", "Hover", &mut out);
        assert_eq!(
            out,
            r#"<figure class="ink-figure"><img src="a.png" alt="" title="Hover" loading="lazy" /></figure>"#
        );
    }

    #[test]
    fn test_resolve_image_src() {
        assert_eq!(resolve_image_src("img/a.png", "/docs"), "/docs/img/a.png");
        assert_eq!(resolve_image_src("/img/a.png", "/docs/"), "/docs/img/a.png");
        assert_eq!(resolve_image_src("/img/a.png", ""), "/img/a.png");
        assert_eq!(
            resolve_image_src("https://cdn.example.com/a.png", "/docs"),
            "https://cdn.example.com/a.png"
        );
    }
}
