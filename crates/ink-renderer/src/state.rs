//! Page-scoped render state.

use std::collections::HashMap;

use pulldown_cmark::Alignment;

use crate::slug::slugify;

/// A heading observed while rendering one page.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Heading {
    /// Anchor id, unique within the page.
    pub id: String,
    /// Plain heading text with markup stripped.
    pub text: String,
    /// Heading level (1-6).
    pub level: u8,
}

/// Escape `&`, `<`, `>` and `"` for HTML text and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

/// Fenced or indented code block being collected.
#[derive(Debug, Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    lang: Option<String>,
    buffer: String,
}

impl CodeBlockState {
    pub(crate) fn start(&mut self, lang: Option<String>) {
        self.active = true;
        self.lang = lang;
        self.buffer.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.lang.take(), std::mem::take(&mut self.buffer))
    }
}

/// Table cell bookkeeping.
#[derive(Debug, Default)]
pub(crate) struct TableState {
    alignments: Vec<Alignment>,
    cell: usize,
    in_head: bool,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.cell = 0;
        self.in_head = false;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// `align` attribute for the current cell, with a leading space.
    pub(crate) fn current_alignment_attr(&self) -> &'static str {
        match self.alignments.get(self.cell) {
            Some(Alignment::Left) => r#" align="left""#,
            Some(Alignment::Center) => r#" align="center""#,
            Some(Alignment::Right) => r#" align="right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// Image alt text being collected.
#[derive(Debug, Default)]
pub(crate) struct ImageState {
    depth: usize,
    alt: String,
}

impl ImageState {
    pub(crate) fn start(&mut self) {
        if self.depth == 0 {
            self.alt.clear();
        }
        self.depth += 1;
    }

    pub(crate) fn is_active(&self) -> bool {
        self.depth > 0
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.alt.push_str(s);
    }

    /// Finish the image. Returns alt text once the outermost image closes.
    pub(crate) fn end(&mut self) -> Option<String> {
        self.depth = self.depth.saturating_sub(1);
        (self.depth == 0).then(|| std::mem::take(&mut self.alt))
    }
}

/// Heading capture and id allocation for one page.
///
/// Ids are derived with [`slugify`] and deduplicated by suffix: the second
/// "FAQ" heading gets `faq-1`, the third `faq-2`. Headings whose slug is empty
/// fall back to `section`.
#[derive(Debug, Default)]
pub(crate) struct HeadingState {
    current: Option<HeadingCapture>,
    used_ids: HashMap<String, usize>,
    headings: Vec<Heading>,
}

#[derive(Debug)]
struct HeadingCapture {
    level: u8,
    text: String,
    html: String,
}

impl HeadingState {
    pub(crate) fn start_heading(&mut self, level: u8) {
        self.current = Some(HeadingCapture {
            level,
            text: String::new(),
            html: String::new(),
        });
    }

    pub(crate) fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Append plain text (used for the id and the TOC entry).
    pub(crate) fn push_text(&mut self, s: &str) {
        if let Some(capture) = &mut self.current {
            capture.text.push_str(s);
        }
    }

    /// Append rendered inline HTML.
    pub(crate) fn push_html(&mut self, s: &str) {
        if let Some(capture) = &mut self.current {
            capture.html.push_str(s);
        }
    }

    /// Finish the heading: allocate its id and record it.
    ///
    /// Returns `(level, id, inner_html)`.
    pub(crate) fn complete_heading(&mut self) -> Option<(u8, String, String)> {
        let capture = self.current.take()?;
        let text = capture.text.trim().to_owned();
        let id = self.unique_id(&text);
        self.headings.push(Heading {
            id: id.clone(),
            text,
            level: capture.level,
        });
        Some((capture.level, id, capture.html.trim().to_owned()))
    }

    pub(crate) fn take_headings(&mut self) -> Vec<Heading> {
        self.used_ids.clear();
        std::mem::take(&mut self.headings)
    }

    fn unique_id(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            "section".clone_into(&mut base);
        }

        let count = self.used_ids.entry(base.clone()).or_insert(0);
        let id = if *count == 0 {
            base.clone()
        } else {
            format!("{base}-{count}")
        };
        *count += 1;

        // A generated suffix may collide with a literal heading ("FAQ 1").
        if id != base && self.used_ids.contains_key(&id) {
            return self.unique_id(&id);
        }
        self.used_ids.entry(id.clone()).or_insert(1);
        id
    }
}
