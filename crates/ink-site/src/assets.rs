//! Static asset copying.

use std::fs;
use std::path::Path;

use crate::error::BuildError;

/// Extensions of files under the docs root that are copied to the output.
pub const STATIC_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "ico", "mp4", "mp3", "pdf", "zip",
];

/// Copy the theme `assets` directory to `<output>/assets`.
///
/// A theme without an `assets` directory is skipped. Returns the number of
/// files copied.
///
/// # Errors
///
/// Returns `BuildError::ReadSource` or `BuildError::Write` on I/O failure.
pub fn copy_theme_assets(theme_dir: &Path, output_dir: &Path) -> Result<usize, BuildError> {
    let assets = theme_dir.join("assets");
    if !assets.is_dir() {
        tracing::debug!(path = %assets.display(), "Theme has no assets directory");
        return Ok(0);
    }
    copy_tree(&assets, &output_dir.join("assets"), &|_| true)
}

/// Copy images and other static files from the docs root, keeping their
/// relative paths. Extension matching is case-insensitive.
///
/// # Errors
///
/// Returns `BuildError::ReadSource` or `BuildError::Write` on I/O failure.
pub fn copy_static_files(source_dir: &Path, output_dir: &Path) -> Result<usize, BuildError> {
    copy_tree(source_dir, output_dir, &is_static_file)
}

fn is_static_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            STATIC_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

fn copy_tree(src: &Path, dest: &Path, filter: &dyn Fn(&Path) -> bool) -> Result<usize, BuildError> {
    let read_err = |source: std::io::Error| BuildError::ReadSource {
        path: src.to_path_buf(),
        source,
    };

    let mut copied = 0;
    for entry in fs::read_dir(src).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        let target = dest.join(entry.file_name());

        if entry.file_type().map_err(read_err)?.is_dir() {
            copied += copy_tree(&path, &target, filter)?;
        } else if filter(&path) {
            fs::create_dir_all(dest).map_err(|source| BuildError::Write {
                path: dest.to_path_buf(),
                source,
            })?;
            fs::copy(&path, &target).map_err(|source| BuildError::Write {
                path: target.clone(),
                source,
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    #[test]
    fn test_copy_static_files() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        write(src.path(), "index.md");
        write(src.path(), "img/logo.PNG");
        write(src.path(), "guide/media/intro.mp4");
        write(src.path(), "notes.txt");

        let copied = copy_static_files(src.path(), out.path()).unwrap();
        assert_eq!(copied, 2);
        assert!(out.path().join("img/logo.PNG").is_file());
        assert!(out.path().join("guide/media/intro.mp4").is_file());
        assert!(!out.path().join("index.md").exists());
        assert!(!out.path().join("notes.txt").exists());
    }

    #[test]
    fn test_copy_theme_assets() {
        let theme = tempdir().unwrap();
        let out = tempdir().unwrap();
        write(theme.path(), "assets/ink.js");
        write(theme.path(), "assets/css/ink.css");

        let copied = copy_theme_assets(theme.path(), out.path()).unwrap();
        assert_eq!(copied, 2);
        assert_eq!(
            fs::read_to_string(out.path().join("assets/css/ink.css")).unwrap(),
            "assets/css/ink.css"
        );
    }

    #[test]
    fn test_theme_without_assets() {
        let theme = tempdir().unwrap();
        let out = tempdir().unwrap();
        assert_eq!(copy_theme_assets(theme.path(), out.path()).unwrap(), 0);
    }
}
