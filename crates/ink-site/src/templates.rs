//! Theme templates.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use ink_template::Template;

use crate::error::BuildError;

/// Parsed theme templates.
///
/// `layout.html` and `page.html` are required. Without `hero.html` hero pages
/// use the page template; without `404.html` no 404 page is written.
#[derive(Clone, Debug)]
pub struct Templates {
    pub layout: Template,
    pub page: Template,
    pub hero: Option<Template>,
    pub not_found: Option<Template>,
}

impl Templates {
    /// Load templates from a theme's `templates` directory.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::MissingTemplate` if a required template is absent
    /// and `BuildError::ReadSource` if a template cannot be read.
    pub fn load(dir: &Path) -> Result<Self, BuildError> {
        let required = |name: &str| {
            load_optional(dir, name)?
                .ok_or_else(|| BuildError::MissingTemplate(dir.join(name)))
        };

        Ok(Self {
            layout: required("layout.html")?,
            page: required("page.html")?,
            hero: load_optional(dir, "hero.html")?,
            not_found: load_optional(dir, "404.html")?,
        })
    }

    /// Build from template sources.
    #[must_use]
    pub fn from_sources(layout: &str, page: &str, hero: Option<&str>, not_found: Option<&str>) -> Self {
        Self {
            layout: Template::parse(layout),
            page: Template::parse(page),
            hero: hero.map(Template::parse),
            not_found: not_found.map(Template::parse),
        }
    }
}

fn load_optional(dir: &Path, name: &str) -> Result<Option<Template>, BuildError> {
    let path = dir.join(name);
    match fs::read_to_string(&path) {
        Ok(source) => Ok(Some(Template::parse(&source))),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Template not found");
            Ok(None)
        }
        Err(source) => Err(BuildError::ReadSource { path, source }),
    }
}
