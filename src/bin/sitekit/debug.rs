use crate::args;
use crate::error::Result;

/// Print site debug information
#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
pub(crate) enum DebugCommands {
    /// Prints post-processed config
    Config {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Print where each static path lands in the output
    Static {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Print enabled feeds and their output paths
    Feeds {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Print the blogroll and social links in order
    Links {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },
}

impl DebugCommands {
    pub(crate) fn run(&self) -> Result<()> {
        match self {
            Self::Config { config } => {
                let settings = config.load_settings()?;
                print!("{settings}");
            }
            Self::Static { config } => {
                let settings = config.load_settings()?;
                let files = settings.static_files();
                if files.is_empty() {
                    log::info!("No static paths configured");
                }
                for file in files {
                    println!("{} -> {}", file.source(), file.output());
                }
            }
            Self::Feeds { config } => {
                let settings = config.load_settings()?;
                let targets = settings.feed_targets();
                if targets.is_empty() {
                    log::info!("All feeds are disabled");
                }
                for target in targets {
                    println!(
                        "{} ({}): {}",
                        target.kind(),
                        target.format(),
                        settings.url_for(target.template())
                    );
                }
            }
            Self::Links { config } => {
                let settings = config.load_settings()?;
                for link in settings.links() {
                    println!("links: {} <{}>", link.label, link.url);
                }
                for link in settings.social() {
                    println!("social: {} <{}>", link.label, link.url);
                }
            }
        }

        Ok(())
    }
}
