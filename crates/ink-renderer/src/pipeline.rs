//! Full markdown-to-HTML pipeline for one site build.

use crate::autospace::autospace;
use crate::directive::{IdGenerator, expand_components, expand_containers, protect_fences};
use crate::html::HtmlBackend;
use crate::locale::Locale;
use crate::renderer::MarkdownRenderer;
use crate::state::Heading;

/// Rendered page body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    pub html: String,
    /// Headings in document order.
    pub headings: Vec<Heading>,
}

/// Markdown pipeline shared by every page of one build.
///
/// Stages, in order:
///
/// 1. Fenced code blocks are swapped for placeholders
/// 2. `:::` containers are expanded
/// 3. `{% %}` components are expanded
/// 4. Code blocks are restored
/// 5. Markdown is rendered to HTML with heading ids
/// 6. CJK spacing is applied outside `<pre>`/`<code>`
///
/// Component ids come from a counter owned by the pipeline, so they are unique
/// across all pages rendered by it.
///
/// # Example
///
/// ```
/// use ink_renderer::{Locale, Pipeline};
///
/// let mut pipeline = Pipeline::new("/docs", Locale::English);
/// let page = pipeline.render("## Hello\n\n::: tip\nUse `ink build`.\n:::\n");
/// assert_eq!(page.headings[0].id, "hello");
/// assert!(page.html.contains(r#"<div class="ink-container ink-tip">"#));
/// ```
#[derive(Debug)]
pub struct Pipeline {
    base_path: String,
    locale: Locale,
    ids: IdGenerator,
}

impl Pipeline {
    #[must_use]
    pub fn new(base_path: impl Into<String>, locale: Locale) -> Self {
        Self {
            base_path: base_path.into(),
            locale,
            ids: IdGenerator::new(),
        }
    }

    /// Render one markdown body (front matter already removed).
    pub fn render(&mut self, markdown: &str) -> RenderedPage {
        let (text, code) = protect_fences(markdown);
        let text = expand_containers(&text, self.locale);
        let text = expand_components(&text, self.locale, &mut self.ids);
        let text = code.restore(&text);

        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_base_path(self.base_path.as_str())
            .render_markdown(&text);

        tracing::trace!(
            code_blocks = code.len(),
            headings = result.headings.len(),
            "Rendered markdown"
        );

        RenderedPage {
            html: autospace(&result.html),
            headings: result.headings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markdown: &str) -> RenderedPage {
        Pipeline::new("", Locale::English).render(markdown)
    }

    #[test]
    fn test_code_blocks_are_not_expanded() {
        let page = render("```md\n::: tip\n{% badge text=\"x\" %}\n:::\n```\n");
        assert!(!page.html.contains("ink-container"));
        assert!(!page.html.contains("ink-badge"));
        assert!(page.html.contains("::: tip\n{% badge text=&quot;x&quot; %}\n:::"));
    }

    #[test]
    fn test_container_body_is_markdown() {
        let page = render("::: warning[Careful]\nThis is **bold**.\n:::\n");
        assert!(page.html.contains("</svg>Careful</p>"));
        assert!(page.html.contains("<p>This is <strong>bold</strong>.</p>"));
    }

    #[test]
    fn test_code_inside_container_is_preserved() {
        let page = render("::: details\n```sh\n::: nested\n```\n:::\n");
        assert!(page.html.contains("<details class=\"ink-details\"><summary>Details</summary>"));
        assert!(page.html.contains(r#"<code class="language-sh">::: nested"#));
    }

    #[test]
    fn test_component_inside_container() {
        let page = render("::: info\nStatus {% badge text=\"New\" %}\n:::\n");
        assert!(page.html.contains(r#"<span class="ink-badge ink-badge-tip">New</span>"#));
    }

    #[test]
    fn test_tab_panels_render_markdown() {
        let page = render("{% tabs %}\n{% tab \"One\" %}\n**a**\n{% endtab %}\n{% endtabs %}\n");
        assert!(page.html.contains("<strong>a</strong>"));
        assert!(page.html.contains(r#"id="tabs_1""#));
    }

    #[test]
    fn test_ids_continue_across_pages() {
        let mut pipeline = Pipeline::new("", Locale::English);
        let first = pipeline.render("{% video src=\"a.mp4\" %}");
        let second = pipeline.render("{% video src=\"b.mp4\" %}");
        assert!(first.html.contains("video_1"));
        assert!(second.html.contains("video_2"));
    }

    #[test]
    fn test_cjk_spacing_skips_code() {
        let page = render("使用Ink构建\n\n```\n代码x\n```\n");
        assert!(page.html.contains("<p>使用 Ink 构建</p>"));
        assert!(page.html.contains("代码x"));
    }

    #[test]
    fn test_image_base_path() {
        let page = Pipeline::new("/docs", Locale::Chinese).render("![](/a.png)");
        assert!(page.html.contains(r#"src="/docs/a.png""#));
    }
}
