//! Generic markdown renderer with pluggable backend.

use std::fmt::Write;
use std::marker::PhantomData;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::backend::RenderBackend;
use crate::state::{CodeBlockState, Heading, HeadingState, ImageState, TableState, escape_html};
use crate::util::heading_level_to_num;

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Every heading in document order, with its anchor id.
    pub headings: Vec<Heading>,
}

/// Generic markdown renderer with pluggable backend.
///
/// Uses the [`RenderBackend`] trait to delegate format-specific rendering
/// while handling common elements (lists, inline formatting) generically.
/// Raw HTML in the input passes through untouched.
pub struct MarkdownRenderer<B: RenderBackend> {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    base_path: String,
    pending_image: Option<(String, String)>,
    gfm: bool,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::default(),
            base_path: String::new(),
            pending_image: None,
            gfm: true,
            _backend: PhantomData,
        }
    }

    /// Set the site base path used to resolve image sources.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
        } else {
            Options::empty()
        }
    }

    /// Render markdown text using the configured parser options.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        let parser = Parser::new_ext(markdown, self.parser_options());
        self.render(parser)
    }

    /// Render markdown events and return the result.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            headings: self.heading.take_headings(),
        }
    }

    /// Push inline markup to the heading buffer or the output.
    ///
    /// Markup inside image alt text is dropped.
    fn push_inline(&mut self, content: &str) {
        if self.image.is_active() {
            return;
        }
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.push_inline(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => {
                let mut out = String::new();
                B::hard_break(&mut out);
                self.push_inline(&out);
            }
            Event::Rule => B::horizontal_rule(&mut self.output),
            Event::TaskListMarker(checked) => B::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag once the id is known
                self.heading.start_heading(heading_level_to_num(level));
            }
            Tag::BlockQuote(_) => B::blockquote_start(&mut self.output),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .filter(|lang| !lang.is_empty())
                        .map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => {
                    let _ = write!(self.output, r#"<ol start="{n}">"#);
                }
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                B::table_start(&mut self.output);
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                let _ = write!(
                    self.output,
                    "<{tag}{}>",
                    self.table.current_alignment_attr()
                );
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<del>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut link = format!(r#"<a href="{}""#, escape_html(&dest_url));
                if !title.is_empty() {
                    let _ = write!(link, r#" title="{}""#, escape_html(&title));
                }
                link.push('>');
                self.push_inline(&link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text is collected until the matching end tag
                if !self.image.is_active() {
                    let src = B::image_src(&dest_url, &self.base_path).into_owned();
                    self.pending_image = Some((src, title.to_string()));
                }
                self.image.start();
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => {
                if let Some((level, id, html)) = self.heading.complete_heading() {
                    B::heading(level, &id, &html, &mut self.output);
                }
            }
            TagEnd::BlockQuote(_) => B::blockquote_end(&mut self.output),
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                let content = content.strip_suffix('\n').unwrap_or(&content);
                B::code_block(lang.as_deref(), content, &mut self.output);
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => {
                self.output.push_str("</tbody>");
                B::table_end(&mut self.output);
            }
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</del>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                if let Some(alt) = self.image.end()
                    && let Some((src, title)) = self.pending_image.take()
                {
                    let mut figure = String::new();
                    B::image(&src, &alt, &title, &mut figure);
                    self.push_inline(&figure);
                }
            }
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
            return;
        }
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        self.push_inline(&format!("<code>{}</code>", escape_html(code)));
    }

    fn soft_break(&mut self) {
        if self.image.is_active() {
            self.image.push_str(" ");
        } else if self.heading.is_active() {
            self.heading.push_text(" ");
            self.heading.push_html("\n");
        } else {
            self.output.push('\n');
        }
    }
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HtmlBackend;
    use pretty_assertions::assert_eq;

    fn render_html(markdown: &str) -> RenderResult {
        MarkdownRenderer::<HtmlBackend>::new().render_markdown(markdown)
    }

    #[test]
    fn test_basic_paragraph() {
        let result = render_html("Hello, world!");
        assert_eq!(result.html, "<p>Hello, world!</p>");
    }

    #[test]
    fn test_heading_with_anchor() {
        let result = render_html("## Section Title");
        assert_eq!(
            result.html,
            r##"<h2 id="section-title"><a class="header-anchor" href="#section-title">#</a>Section Title</h2>"##
        );
        assert_eq!(
            result.headings,
            vec![Heading {
                id: "section-title".to_owned(),
                text: "Section Title".to_owned(),
                level: 2,
            }]
        );
    }

    #[test]
    fn test_every_heading_level_is_recorded() {
        let result = render_html("# One\n\n## Two\n\n### Three\n\n#### Four");
        let levels: Vec<u8> = result.headings.iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let result = render_html("## FAQ\n\n## FAQ\n\n## FAQ");
        let ids: Vec<&str> = result.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["faq", "faq-1", "faq-2"]);
    }

    #[test]
    fn test_heading_with_inline_code() {
        let result = render_html("## Install `ink`");
        assert!(result.html.contains("Install <code>ink</code></h2>"));
        assert_eq!(result.headings[0].text, "Install ink");
        assert_eq!(result.headings[0].id, "install-ink");
    }

    #[test]
    fn test_heading_with_emphasis() {
        let result = render_html("## A *fast* start");
        assert!(result.html.contains("A <em>fast</em> start</h2>"));
        assert_eq!(result.headings[0].text, "A fast start");
    }

    #[test]
    fn test_code_block() {
        let result = render_html("```rust\nfn main() {}\n```");
        assert!(result.html.contains(r#"<span class="code-lang">rust</span>"#));
        assert!(result.html.contains(r#"<code class="language-rust">fn main() {}</code>"#));
    }

    #[test]
    fn test_code_block_info_string_extra_words() {
        let result = render_html("```js title=\"a.js\"\nx\n```");
        assert!(result.html.contains(r#"class="language-js""#));
    }

    #[test]
    fn test_table_is_wrapped() {
        let result = render_html("| A | B |\n|:--|--:|\n| 1 | 2 |");
        assert_eq!(
            result.html,
            concat!(
                r#"<div class="table-wrap"><table><thead><tr><th align="left">A</th><th align="right">B</th></tr></thead>"#,
                r#"<tbody><tr><td align="left">1</td><td align="right">2</td></tr></tbody></table></div>"#
            )
        );
    }

    #[test]
    fn test_image_uses_base_path() {
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_base_path("/docs")
            .render_markdown("![A *cat*](img/cat.png \"Cat\")");
        assert_eq!(
            result.html,
            r#"<p><figure class="ink-figure"><img src="/docs/img/cat.png" alt="A cat" title="Cat" loading="lazy" /><figcaption>A cat</figcaption></figure></p>"#
        );
    }

    #[test]
    fn test_link() {
        let result = render_html("[Guide](/guide.html \"Read\")");
        assert_eq!(
            result.html,
            r#"<p><a href="/guide.html" title="Read">Guide</a></p>"#
        );
    }

    #[test]
    fn test_raw_html_passes_through() {
        let result = render_html("<div class=\"x\">\n\n**bold**\n\n</div>");
        assert!(result.html.contains(r#"<div class="x">"#));
        assert!(result.html.contains("<strong>bold</strong>"));
        assert!(result.html.contains("</div>"));
    }

    #[test]
    fn test_emphasis_and_strikethrough() {
        let result = render_html("*a* **b** ~~c~~");
        assert_eq!(
            result.html,
            "<p><em>a</em> <strong>b</strong> <del>c</del></p>"
        );
    }

    #[test]
    fn test_lists() {
        assert_eq!(render_html("- a\n- b").html, "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(render_html("3. a\n4. b").html, r#"<ol start="3"><li>a</li><li>b</li></ol>"#);
    }

    #[test]
    fn test_task_list() {
        let result = render_html("- [ ] todo\n- [x] done");
        assert!(result.html.contains(r#"<input type="checkbox" disabled> todo"#));
        assert!(result.html.contains(r#"<input type="checkbox" checked disabled> done"#));
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(render_html("a < b & c").html, "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_gfm_disabled() {
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_gfm(false)
            .render_markdown("| A | B |\n|---|---|\n| 1 | 2 |");
        assert!(!result.html.contains("<table>"));
    }

    #[test]
    fn test_renderer_is_reusable() {
        let mut renderer = MarkdownRenderer::<HtmlBackend>::new();
        let first = renderer.render_markdown("## Intro");
        let second = renderer.render_markdown("## Intro");
        assert_eq!(first.headings[0].id, "intro");
        assert_eq!(second.headings[0].id, "intro");
        assert_eq!(first.html, second.html);
    }
}
