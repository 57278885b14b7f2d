//! Document collection.
//!
//! Walks the docs root depth-first. Within a directory `index.md` comes first
//! and the remaining entries follow in byte order of their names, so the page
//! order (and therefore prev/next) is the same on every machine.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use crate::error::BuildError;
use crate::frontmatter::FrontMatterParser;
use crate::page::Page;

const INDEX_FILE: &str = "index.md";

/// Collect every `.md` file under `root` as a [`Page`], in build order.
///
/// # Errors
///
/// Returns `BuildError::SourceNotFound` if `root` is not a directory,
/// `BuildError::ReadSource` if a directory or file cannot be read and
/// `BuildError::FrontMatter` if a page has malformed front matter.
pub fn collect_pages(root: &Path, parser: &dyn FrontMatterParser) -> Result<Vec<Page>, BuildError> {
    if !root.is_dir() {
        return Err(BuildError::SourceNotFound(root.to_path_buf()));
    }

    let mut pages = Vec::new();
    walk(root, "", parser, &mut pages)?;
    tracing::debug!(count = pages.len(), root = %root.display(), "Collected pages");
    Ok(pages)
}

fn walk(
    dir: &Path,
    rel: &str,
    parser: &dyn FrontMatterParser,
    pages: &mut Vec<Page>,
) -> Result<(), BuildError> {
    let read_err = |source: std::io::Error| BuildError::ReadSource {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().map_err(read_err)?.is_dir();
        entries.push((name, is_dir));
    }
    entries.sort_by(|(a, _), (b, _)| compare_entries(a, b));

    for (name, is_dir) in entries {
        let full_path = dir.join(&name);
        let rel_path = if rel.is_empty() {
            name.clone()
        } else {
            format!("{rel}/{name}")
        };

        if is_dir {
            walk(&full_path, &rel_path, parser, pages)?;
        } else if name.ends_with(".md") {
            let raw = fs::read_to_string(&full_path).map_err(|source| BuildError::ReadSource {
                path: full_path.clone(),
                source,
            })?;
            let (frontmatter, content) =
                parser
                    .split(&raw)
                    .map_err(|source| BuildError::FrontMatter {
                        path: full_path.clone(),
                        source,
                    })?;
            pages.push(Page::new(rel_path, full_path, frontmatter, content));
        }
    }

    Ok(())
}

/// `index.md` first, then byte-wise name order.
fn compare_entries(a: &str, b: &str) -> Ordering {
    match (a == INDEX_FILE, b == INDEX_FILE) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.cmp(b),
    }
}
