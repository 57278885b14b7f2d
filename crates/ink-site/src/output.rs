//! Build output and disk writes.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use ink_config::ProjectPaths;

use crate::error::BuildError;
use crate::search::SearchEntry;

/// File name of the search index in the output root.
pub const SEARCH_INDEX_FILE: &str = "search-index.json";

/// File name of the not-found page in the output root.
pub const NOT_FOUND_FILE: &str = "404.html";

/// One rendered HTML page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputFile {
    /// Path relative to the output root, `/`-separated.
    pub path: String,
    pub html: String,
}

/// Everything a build produces, held in memory until written.
#[derive(Clone, Debug, Default)]
pub struct BuiltSite {
    /// Rendered pages in build order.
    pub pages: Vec<OutputFile>,
    /// Rendered 404 page, if the theme has a `404.html` template.
    pub not_found: Option<String>,
    pub search_index: Vec<SearchEntry>,
}

impl BuiltSite {
    /// Look up a rendered page by its output path.
    #[must_use]
    pub fn page(&self, path: &str) -> Option<&OutputFile> {
        self.pages.iter().find(|page| page.path == path)
    }

    /// Write pages, the 404 page and the search index under `dir`.
    ///
    /// Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Write` if a file cannot be written and
    /// `BuildError::Serialize` if the search index cannot be encoded.
    pub fn write_to(&self, dir: &Path) -> Result<(), BuildError> {
        for page in &self.pages {
            write_file(&dir.join(&page.path), page.html.as_bytes())?;
        }
        if let Some(html) = &self.not_found {
            write_file(&dir.join(NOT_FOUND_FILE), html.as_bytes())?;
        }
        let index = serde_json::to_string(&self.search_index)?;
        write_file(&dir.join(SEARCH_INDEX_FILE), index.as_bytes())?;

        tracing::debug!(
            dir = %dir.display(),
            pages = self.pages.len(),
            "Wrote site"
        );
        Ok(())
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), BuildError> {
    let write_err = |source: std::io::Error| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, contents).map_err(write_err)
}

/// Refuse an output directory that is, or contains, the sources or the theme.
///
/// Both sides are resolved to absolute paths first, so `docs/..` and `.`
/// are caught whatever spelling the source directory uses. Call this before
/// [`clean_output_dir`].
///
/// # Errors
///
/// Returns `BuildError::OutputContainsSource` if clearing the output directory
/// would delete the sources or the theme.
pub fn check_output_dir(paths: &ProjectPaths) -> Result<(), BuildError> {
    let output = resolve(&paths.output_dir);
    for protected in [&paths.source_dir, &paths.theme_dir] {
        if resolve(protected).starts_with(&output) {
            return Err(BuildError::OutputContainsSource(paths.output_dir.clone()));
        }
    }
    Ok(())
}

/// Absolute form of `path` with symlinks, `.` and `..` resolved.
///
/// Paths that do not exist yet keep their missing tail, appended to the
/// canonical form of their deepest existing ancestor.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    let absolute = std::path::absolute(path).map_or_else(|_| normalize(path), |p| normalize(&p));

    let mut missing = Vec::new();
    let mut existing = absolute.as_path();
    while let (Some(parent), Some(name)) = (existing.parent(), existing.file_name()) {
        missing.push(name);
        existing = parent;
        if let Ok(canonical) = fs::canonicalize(existing) {
            return missing.iter().rev().fold(canonical, |acc, name| acc.join(name));
        }
    }
    absolute
}

/// Lexically fold `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Remove an output directory and everything in it.
///
/// Returns `false` if the directory did not exist. This does not check what
/// the directory contains; see [`check_output_dir`].
///
/// # Errors
///
/// Returns `BuildError::Write` if removal fails.
pub fn clean_output_dir(dir: &Path) -> Result<bool, BuildError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {
            tracing::debug!(dir = %dir.display(), "Removed output directory");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(source) => Err(BuildError::Write {
            path: dir.to_path_buf(),
            source,
        }),
    }
}
