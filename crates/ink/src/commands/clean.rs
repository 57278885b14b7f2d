//! `ink clean` command implementation.

use clap::Args;

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the clean command.
#[derive(Args, Debug)]
pub(crate) struct CleanArgs {
    #[command(flatten)]
    project: ProjectArgs,
}

impl CleanArgs {
    /// Execute the clean command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the output directory contains the
    /// sources, or the directory cannot be removed.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.project.load_config()?;
        let dir = &config.paths.output_dir;
        ink_site::check_output_dir(&config.paths)?;

        if ink_site::clean_output_dir(dir)? {
            output.success(&format!("Removed {}", dir.display()));
        } else {
            output.info(&format!("Nothing to clean at {}", dir.display()));
        }
        Ok(())
    }
}
