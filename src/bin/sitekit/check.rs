use itertools::Itertools as _;
use sitekit::config::Environment;

use crate::args;
use crate::error::Result;

/// Validate the settings, failing on the first bad key
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct CheckArgs {
    /// Check every deployment variant instead of `--env`
    #[arg(long)]
    pub(crate) all: bool,

    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl CheckArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let environments = if self.all {
            Environment::ALL.to_vec()
        } else {
            vec![self.config.env]
        };

        for environment in environments {
            let settings = self.config.load_settings_for(environment)?;
            let feeds = settings.feed_targets();
            log::info!(
                "{} feeds enabled{}",
                feeds.len(),
                if feeds.is_empty() {
                    String::new()
                } else {
                    format!(": {}", feeds.iter().map(|f| f.kind()).join(", "))
                }
            );
            log::info!(
                "{} static paths, {} remapped",
                settings.static_paths().len(),
                settings.extra_path_metadata().len()
            );
            println!("{} ({}): ok", settings.site_name(), environment);
        }

        Ok(())
    }
}
