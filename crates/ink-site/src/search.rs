//! Client-side search index.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::page::Page;

/// Maximum number of characters of page text stored per entry.
pub const MAX_CONTENT_CHARS: usize = 2000;

static FRONT_MATTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A---[\s\S]*?---").unwrap());
static COMPONENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{%[\s\S]*?%\}").unwrap());
static CONTAINER_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^:::.*$").unwrap());
static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#*`\[\](){}|>_~]").unwrap());

/// One search index record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    pub title: String,
    pub url: String,
    pub content: String,
}

impl SearchEntry {
    #[must_use]
    pub fn from_page(page: &Page, base: &str) -> Self {
        Self {
            title: page.frontmatter.title().unwrap_or(&page.slug).to_owned(),
            url: page.link(base),
            content: search_text(&page.content),
        }
    }
}

/// Plain text of a markdown body for indexing.
///
/// Removes a leading front matter block, component tags and container fence
/// lines (their bodies are kept), then markdown punctuation. The result is
/// cut to [`MAX_CONTENT_CHARS`] characters.
#[must_use]
pub fn search_text(markdown: &str) -> String {
    let text = FRONT_MATTER_RE.replace(markdown, "");
    let text = COMPONENT_RE.replace_all(&text, "");
    let text = CONTAINER_FENCE_RE.replace_all(&text, "");
    let text = PUNCTUATION_RE.replace_all(&text, "");
    text.chars().take(MAX_CONTENT_CHARS).collect()
}

/// Build the index for all pages, in page order.
#[must_use]
pub fn build_search_index(pages: &[Page], base: &str) -> Vec<SearchEntry> {
    pages
        .iter()
        .map(|page| SearchEntry::from_page(page, base))
        .collect()
}
