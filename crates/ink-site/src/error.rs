//! Build errors.

use std::path::PathBuf;

use crate::frontmatter::FrontMatterError;

/// Fatal build error.
///
/// Per-page defects such as malformed directives never surface here; they are
/// rendered literally and logged.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// Output directory is the source or theme directory, or one of their ancestors.
    #[error("Refusing to clear output directory {} because it contains the sources", .0.display())]
    OutputContainsSource(PathBuf),
    /// Required template is missing.
    #[error("Template not found: {}", .0.display())]
    MissingTemplate(PathBuf),
    /// A source file or template could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Front matter of a page could not be parsed.
    #[error("Invalid front matter in {}: {source}", path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
    /// An output file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Template context or search index serialization failed.
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
