//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod clean;

use std::path::PathBuf;

use clap::Args;
use ink_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use clean::CleanArgs;

/// Project location arguments shared by all commands.
#[derive(Args, Debug)]
pub(crate) struct ProjectArgs {
    /// Path to configuration file (default: auto-discover ink.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Theme directory (overrides config).
    #[arg(long)]
    theme_dir: Option<PathBuf>,

    /// URL prefix for generated links, e.g. `/docs` (overrides config).
    #[arg(long)]
    base_path: Option<String>,
}

impl ProjectArgs {
    /// Load and validate configuration with command-line overrides applied.
    pub(crate) fn load_config(self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            theme_dir: self.theme_dir,
            base_path: self.base_path,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(config: PathBuf) -> ProjectArgs {
        ProjectArgs {
            config: Some(config),
            source_dir: None,
            output_dir: Some(PathBuf::from("public")),
            theme_dir: None,
            base_path: Some("/guide".to_owned()),
        }
    }

    #[test]
    fn test_overrides_apply_after_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ink.toml");
        fs::write(&path, "basePath = \"/docs\"\noutDir = \"site\"\n").unwrap();

        let config = args(path).load_config().unwrap();
        assert_eq!(config.base_path, "/guide");
        assert_eq!(config.paths.output_dir, PathBuf::from("public"));
        assert_eq!(config.paths.source_dir, dir.path().join("docs"));
    }

    #[test]
    fn test_invalid_base_path_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ink.toml");
        fs::write(&path, "").unwrap();

        let mut args = args(path);
        args.base_path = Some("docs".to_owned());
        assert!(matches!(args.load_config(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = tempdir().unwrap();
        let result = args(dir.path().join("missing.toml")).load_config();
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
