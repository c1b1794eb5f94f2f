use std::env;
use std::io::Write as _;
use std::path;

use anyhow::Context as _;
use sitekit::config::Config;
use sitekit::config::Environment;

use crate::check;
use crate::debug;
use crate::error::Result;
use crate::new;

/// Typed, validated settings for a static site
#[derive(Debug, clap::Parser)]
#[command(about, author, version)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) color: colorchoice_clap::Color,

    #[command(flatten)]
    pub(crate) verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::WarnLevel>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
pub(crate) enum Command {
    Init(new::InitArgs),
    Check(check::CheckArgs),
    #[command(subcommand)]
    Debug(debug::DebugCommands),
}

impl Command {
    pub(crate) fn run(&self) -> Result<()> {
        match self {
            Self::Init(cmd) => cmd.run(),
            Self::Check(cmd) => cmd.run(),
            Self::Debug(cmd) => cmd.run(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ConfigArgs {
    /// Config file to use [default: _site.yml]
    #[arg(short, long, value_name = "FILE")]
    pub(crate) config: Option<path::PathBuf>,

    /// Deployment variant to resolve [possible values: development, production]
    #[arg(short, long, value_name = "ENV", env = "SITEKIT_ENV", default_value_t)]
    pub(crate) env: Environment,
}

impl ConfigArgs {
    pub(crate) fn load_config(&self) -> Result<Config> {
        self.load_config_for(self.env)
    }

    pub(crate) fn load_config_for(&self, environment: Environment) -> Result<Config> {
        let config = if let Some(config_path) = self.config.as_deref() {
            Config::from_file_for(config_path, environment).with_context(|| {
                anyhow::format_err!("Error reading config file {}", config_path.display())
            })?
        } else {
            let cwd = env::current_dir().context("Failed to read current directory")?;
            Config::from_cwd_for(cwd, environment)?
        };

        Ok(config)
    }

    pub(crate) fn load_settings(&self) -> Result<sitekit::Settings> {
        sitekit::Settings::from_config(self.load_config()?)
    }

    pub(crate) fn load_settings_for(&self, environment: Environment) -> Result<sitekit::Settings> {
        sitekit::Settings::from_config(self.load_config_for(environment)?)
    }
}

pub(crate) fn init_logging(level: log::LevelFilter, colored: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter(None, level);
    builder.format(move |f, record| {
        let style = if colored {
            level_style(record.level())
        } else {
            anstyle::Style::new()
        };
        writeln!(
            f,
            "{style}[{}]{style:#} {}",
            record.level().as_str().to_lowercase(),
            record.args()
        )
    });
    builder.init();
}

fn level_style(level: log::Level) -> anstyle::Style {
    match level {
        log::Level::Error => anstyle::AnsiColor::Red.on_default().bold(),
        log::Level::Warn => anstyle::AnsiColor::Yellow.on_default(),
        log::Level::Info => anstyle::AnsiColor::Green.on_default(),
        log::Level::Debug => anstyle::AnsiColor::Blue.on_default(),
        log::Level::Trace => anstyle::AnsiColor::Cyan.on_default(),
    }
}
