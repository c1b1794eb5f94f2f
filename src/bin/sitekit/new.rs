use std::path;

use crate::error::Result;

/// Create a starter `_site.yml` and `_site.production.yml`
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct InitArgs {
    /// Target directory
    #[arg(default_value = ".")]
    pub(crate) directory: path::PathBuf,
}

impl InitArgs {
    pub(crate) fn run(&self) -> Result<()> {
        sitekit::create_new_project(&self.directory)?;
        log::info!("Created new site at {}", self.directory.display());

        Ok(())
    }
}
