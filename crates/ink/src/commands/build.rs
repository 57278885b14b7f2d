//! `ink build` command implementation.

use std::time::Instant;

use clap::Args;

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args, Debug)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    project: ProjectArgs,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the site cannot be built.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.project.load_config()?;
        let started = Instant::now();

        output.banner(&format!("Building {}", config.title));
        output.field("Source", config.paths.source_dir.display());
        output.field("Output", config.paths.output_dir.display());

        let stats = ink_site::build_site(&config)?;

        output.success(&format!(
            "Done in {}ms - {} pages",
            started.elapsed().as_millis(),
            stats.pages
        ));
        Ok(())
    }
}
