//! Configuration management for Ink.
//!
//! Parses `ink.toml` configuration files and provides auto-discovery of the
//! config file in parent directories.
//!
//! The user file is a *partial* object. It is merged over a fixed default
//! object with [`deep_merge`] and only then deserialized into [`Config`], so
//! every field of the typed struct is always populated.
//!
//! | Field | Merge behavior |
//! |-------|----------------|
//! | `title`, `description`, `basePath`, `language` | replaced |
//! | `srcDir`, `outDir`, `themeDir` | replaced |
//! | `themeConfig` | merged key-wise |
//! | `themeConfig.nav` | replaced wholesale |
//! | `themeConfig.sidebar` | replaced wholesale (`"auto"` or an explicit tree) |
//! | `themeConfig.search`, `darkMode`, `editLink`, `lastUpdated` | replaced |
//! | `themeConfig.footer` | merged key-wise |
//!
//! CLI settings can be applied during load via [`CliSettings`].

mod merge;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Value, json};

pub use merge::deep_merge;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "ink.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override theme directory.
    pub theme_dir: Option<PathBuf>,
    /// Override base path.
    pub base_path: Option<String>,
}

/// Site configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Site title, appended to every page title.
    pub title: String,
    /// Default page description.
    pub description: String,
    /// URL prefix for every emitted link (e.g. `/docs`).
    pub base_path: String,
    /// Document language (`<html lang>` and localized UI strings).
    pub language: String,
    /// Theme configuration.
    pub theme_config: ThemeConfig,
    /// Markdown source directory, relative to the config file.
    pub src_dir: String,
    /// Output directory, relative to the config file.
    pub out_dir: String,
    /// Theme directory holding `templates/`, relative to the config file.
    pub theme_dir: String,

    /// Resolved paths (set after loading).
    #[serde(skip)]
    pub paths: ProjectPaths,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Theme configuration (`themeConfig`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Top navigation links.
    pub nav: Vec<NavItem>,
    /// Sidebar mode.
    pub sidebar: SidebarConfig,
    /// Whether the search box is enabled.
    pub search: bool,
    /// Whether the dark mode toggle is shown.
    pub dark_mode: bool,
    /// Prefix for "edit this page" links; empty disables them.
    pub edit_link: String,
    /// Whether pages show their last modification date.
    pub last_updated: bool,
    /// Footer content.
    pub footer: Footer,
}

/// A top navigation link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Link text.
    pub text: String,
    /// Link target.
    #[serde(default)]
    pub link: String,
    /// Optional icon markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Footer content.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Footer {
    /// Footer message (raw HTML).
    pub message: String,
    /// Copyright line (raw HTML).
    pub copyright: String,
}

/// Sidebar mode.
///
/// The string `"auto"` derives the sidebar from the file tree. Any other value
/// is an explicit tree that is passed to templates unmodified.
#[derive(Clone, Debug, PartialEq)]
pub enum SidebarConfig {
    /// Derive the sidebar from the collected pages.
    Auto,
    /// User-supplied sidebar tree.
    Explicit(Value),
}

impl Serialize for SidebarConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::Explicit(tree) => tree.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SidebarConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(ref s) if s == "auto" => Self::Auto,
            other => Self::Explicit(other),
        })
    }
}

/// Resolved project paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectPaths {
    /// Markdown source directory.
    pub source_dir: PathBuf,
    /// Output directory.
    pub output_dir: PathBuf,
    /// Theme directory.
    pub theme_dir: PathBuf,
}

impl ProjectPaths {
    /// Templates directory inside the theme (`<theme>/templates`).
    #[must_use]
    pub fn templates_dir(&self) -> PathBuf {
        self.theme_dir.join("templates")
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Merged configuration does not match the expected shape.
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

impl Config {
    /// The built-in default configuration as a JSON object.
    ///
    /// This is the left-hand side of every merge.
    #[must_use]
    pub fn default_value() -> Value {
        json!({
            "title": "Ink Docs",
            "description": "Documentation powered by Ink",
            "basePath": "",
            "language": "zh-CN",
            "themeConfig": {
                "nav": [],
                "sidebar": "auto",
                "search": true,
                "darkMode": true,
                "editLink": "",
                "lastUpdated": true,
                "footer": { "message": "Powered by Ink", "copyright": "" }
            },
            "srcDir": "docs",
            "outDir": "dist",
            "themeDir": "themes/default"
        })
    }

    /// Build a configuration from a partial user object.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the merged object has the wrong shape
    /// (e.g. `footer = false`), or `ConfigError::Validation` if validation fails.
    pub fn from_user_value(user: &Value) -> Result<Self, ConfigError> {
        let merged = deep_merge(&Self::default_value(), user);
        let mut config: Self = serde_json::from_value(merged)?;
        config.resolve_paths(Path::new("."));
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from `ink.toml` content.
    ///
    /// Paths are resolved relative to the current directory; use
    /// [`Config::load`] to resolve them against the file location.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(content)?;
        Self::from_user_value(&serde_json::to_value(table)?)
    }

    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `ink.toml` in current directory and parents.
    /// Without any config file the defaults are used.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Base path with trailing slashes stripped (`"/docs/"` becomes `"/docs"`).
    #[must_use]
    pub fn base(&self) -> &str {
        self.base_path.trim_end_matches('/')
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "language cannot be empty".to_owned(),
            ));
        }
        if !self.base_path.is_empty() && !self.base_path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "basePath must start with '/', got {:?}",
                self.base_path
            )));
        }
        Ok(())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.paths.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.paths.output_dir.clone_from(output_dir);
        }
        if let Some(theme_dir) = &settings.theme_dir {
            self.paths.theme_dir.clone_from(theme_dir);
        }
        if let Some(base_path) = &settings.base_path {
            self.base_path.clone_from(base_path);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config: Self = serde_json::from_value(Self::default_value())
            .unwrap_or_else(|e| unreachable!("built-in defaults are well-formed: {e}"));
        config.resolve_paths(base);
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Resolve relative directories against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.paths = ProjectPaths {
            source_dir: config_dir.join(&self.src_dir),
            output_dir: config_dir.join(&self.out_dir),
            theme_dir: config_dir.join(&self.theme_dir),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.title, "Ink Docs");
        assert_eq!(config.language, "zh-CN");
        assert_eq!(config.base_path, "");
        assert!(config.theme_config.search);
        assert!(config.theme_config.dark_mode);
        assert!(config.theme_config.last_updated);
        assert_eq!(config.theme_config.sidebar, SidebarConfig::Auto);
        assert_eq!(config.theme_config.footer.message, "Powered by Ink");
        assert_eq!(config.paths.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.paths.output_dir, PathBuf::from("/test/dist"));
        assert_eq!(
            config.paths.templates_dir(),
            PathBuf::from("/test/themes/default/templates")
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.title, "Ink Docs");
        assert!(config.theme_config.nav.is_empty());
    }

    #[test]
    fn test_nested_override_keeps_sibling_defaults() {
        let config = Config::from_user_value(&json!({"themeConfig": {"search": false}})).unwrap();
        assert!(!config.theme_config.search);
        assert!(config.theme_config.dark_mode);
        assert_eq!(config.theme_config.footer.message, "Powered by Ink");
    }

    #[test]
    fn test_nav_replaces_wholesale() {
        let config = Config::from_user_value(&json!({
            "themeConfig": {"nav": [{"text": "Guide", "link": "/guide/"}]}
        }))
        .unwrap();
        assert_eq!(
            config.theme_config.nav,
            vec![NavItem {
                text: "Guide".to_owned(),
                link: "/guide/".to_owned(),
                icon: None,
            }]
        );

        let again = deep_merge(
            &serde_json::to_value(&config).unwrap(),
            &json!({"themeConfig": {"nav": [{"text": "API", "link": "/api/"}]}}),
        );
        assert_eq!(again["themeConfig"]["nav"].as_array().unwrap().len(), 1);
        assert_eq!(again["themeConfig"]["nav"][0]["text"], "API");
    }

    #[test]
    fn test_footer_merges_keywise() {
        let config = Config::from_user_value(&json!({
            "themeConfig": {"footer": {"copyright": "(c) 2026"}}
        }))
        .unwrap();
        assert_eq!(config.theme_config.footer.message, "Powered by Ink");
        assert_eq!(config.theme_config.footer.copyright, "(c) 2026");
    }

    #[test]
    fn test_explicit_sidebar_passes_through() {
        let tree = json!([{"text": "Intro", "items": [{"text": "A", "link": "/a.html"}]}]);
        let config =
            Config::from_user_value(&json!({"themeConfig": {"sidebar": tree.clone()}})).unwrap();
        assert_eq!(config.theme_config.sidebar, SidebarConfig::Explicit(tree));
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let result = Config::from_user_value(&json!({"themeConfig": {"footer": false}}));
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
title = "Ink"
basePath = "/ink/"

[themeConfig]
search = false
editLink = "https://example.com/edit/main/docs/"

[[themeConfig.nav]]
text = "GitHub"
link = "https://github.com/example/ink"
"#;
        let config = Config::from_toml_str(toml).unwrap();
        assert_eq!(config.title, "Ink");
        assert_eq!(config.base(), "/ink");
        assert!(!config.theme_config.search);
        assert!(config.theme_config.dark_mode);
        assert_eq!(config.theme_config.nav.len(), 1);
        assert_eq!(
            config.theme_config.edit_link,
            "https://example.com/edit/main/docs/"
        );
    }

    #[test]
    fn test_base_strips_trailing_slashes() {
        let config = Config::from_user_value(&json!({"basePath": "/docs//"})).unwrap();
        assert_eq!(config.base(), "/docs");
        assert_eq!(Config::default().base(), "");
    }

    #[test]
    fn test_validation_rejects_relative_base_path() {
        let result = Config::from_user_value(&json!({"basePath": "docs"}));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validation_rejects_empty_language() {
        let result = Config::from_user_value(&json!({"language": ""}));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("language"));
    }

    #[test]
    fn test_load_resolves_paths_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ink.toml");
        std::fs::write(&path, "srcDir = \"content\"\noutDir = \"public\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.paths.source_dir, dir.path().join("content"));
        assert_eq!(config.paths.output_dir, dir.path().join("public"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Config::load(Some(Path::new("/nonexistent/ink.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            base_path: Some("/preview".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.paths.source_dir, PathBuf::from("/custom/docs"));
        assert_eq!(config.paths.output_dir, PathBuf::from("/test/dist")); // Unchanged
        assert_eq!(config.base(), "/preview");
    }

    #[test]
    fn test_config_serializes_camel_case() {
        let value = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(value["themeConfig"]["darkMode"], json!(true));
        assert_eq!(value["themeConfig"]["sidebar"], json!("auto"));
        assert!(value.get("paths").is_none());
    }
}
