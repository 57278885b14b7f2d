//! Page records.

use std::path::PathBuf;

use serde::Serialize;

use crate::frontmatter::Frontmatter;

/// One markdown source file.
///
/// Created during collection and never modified afterwards. Rendering derives
/// new values from `content`; it does not rewrite it.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    /// `/`-separated path without extension; `index` for the root page.
    pub slug: String,
    /// Output file path relative to the output root.
    pub out_path: String,
    pub frontmatter: Frontmatter,
    /// Markdown body with the front matter removed.
    pub content: String,
    /// Source path relative to the docs root, with `/` separators.
    pub rel_path: String,
    /// Source file on disk.
    pub source_path: PathBuf,
}

impl Page {
    /// Create a page, deriving slug and output path from `rel_path`.
    #[must_use]
    pub fn new(
        rel_path: impl Into<String>,
        source_path: impl Into<PathBuf>,
        frontmatter: Frontmatter,
        content: impl Into<String>,
    ) -> Self {
        let rel_path = rel_path.into();
        let slug = slug_for(&rel_path);
        Self {
            out_path: out_path_for(&slug),
            slug,
            frontmatter,
            content: content.into(),
            rel_path,
            source_path: source_path.into(),
        }
    }

    /// Page title: front matter, then the first `# ` heading, then `fallback`.
    #[must_use]
    pub fn title<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.frontmatter
            .title()
            .or_else(|| extract_title(&self.content))
            .unwrap_or(fallback)
    }

    /// Site-absolute link to the page output.
    #[must_use]
    pub fn link(&self, base: &str) -> String {
        format!("{base}/{}", self.out_path)
    }

    /// Whether the page asks for the hero layout and provides hero data.
    #[must_use]
    pub fn is_hero(&self) -> bool {
        self.frontmatter.layout() == Some("hero") && self.frontmatter.hero().is_some()
    }

    /// Compact reference used for prev/next links.
    #[must_use]
    pub fn to_ref(&self, base: &str) -> PageRef {
        PageRef {
            slug: self.slug.clone(),
            title: self.title(&self.slug).to_owned(),
            link: self.link(base),
            out_path: self.out_path.clone(),
        }
    }
}

/// Reference to a neighbouring page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRef {
    pub slug: String,
    pub title: String,
    pub link: String,
    pub out_path: String,
}

/// Derive a slug from a relative source path.
///
/// `guide/start.md` becomes `guide/start`, `guide/index.md` becomes `guide`
/// and the root `index.md` becomes `index`.
#[must_use]
pub fn slug_for(rel_path: &str) -> String {
    let stem = rel_path.strip_suffix(".md").unwrap_or(rel_path);
    let stem = if stem == "index" {
        ""
    } else {
        stem.strip_suffix("/index").unwrap_or(stem)
    };
    if stem.is_empty() {
        "index".to_owned()
    } else {
        stem.to_owned()
    }
}

/// Output path for a slug.
#[must_use]
pub fn out_path_for(slug: &str) -> String {
    if slug == "index" {
        "index.html".to_owned()
    } else {
        format!("{slug}.html")
    }
}

/// Text of the first level-1 ATX heading outside fenced code.
#[must_use]
pub fn extract_title(markdown: &str) -> Option<&str> {
    let mut fence: Option<&str> = None;
    for line in markdown.lines() {
        let ticks = line.bytes().take_while(|&b| b == b'`').count();
        if ticks >= 3 {
            let run = &line[..ticks];
            match fence {
                Some(open) if line.trim_end() == open => fence = None,
                None => fence = Some(run),
                Some(_) => {}
            }
            continue;
        }
        if fence.is_some() {
            continue;
        }

        let Some(rest) = line.strip_prefix('#') else {
            continue;
        };
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        let title = rest.trim();
        if !title.is_empty() {
            return Some(title);
        }
    }
    None
}
