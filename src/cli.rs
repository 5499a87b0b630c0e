use std::path::PathBuf;

mod chart;
mod config;
mod dashboard;
mod doctors;
mod medicines;
mod session;
mod table;
mod terminal;

use anyhow::Context as _;
use chart::Chart;
use clap::ArgAction;
use clinic::{Config, Portal, Seed, Store};
use dashboard::Dashboard;
use doctors::Doctors;
use medicines::Medicines;
use session::Session;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to a TOML seed file to use instead of the built-in demo data
    #[arg(short, long, global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let context = Context {
            config: self.config,
            seed: self.seed,
        };

        self.command
            .unwrap_or_else(|| Command::Dashboard(Dashboard::default()))
            .run(&context)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Global options shared by every subcommand.
#[derive(Debug, Default)]
pub struct Context {
    config: Option<PathBuf>,
    seed: Option<PathBuf>,
}

impl Context {
    /// The configuration file, or defaults when none was given.
    fn config(&self) -> anyhow::Result<Config> {
        self.config.as_deref().map_or_else(
            || Ok(Config::default()),
            |path| Config::load(path).map_err(|e| anyhow::anyhow!("{e}")),
        )
    }

    /// Builds a fresh portal from the seed and configuration.
    fn portal(&self) -> anyhow::Result<Portal> {
        let seed = match &self.seed {
            Some(path) => Seed::load(path)
                .with_context(|| format!("failed to load seed from {}", path.display()))?,
            None => Seed::demo(),
        };
        let layout = self.config()?.layout();
        Ok(Portal::new(Store::new(seed), layout))
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show the patient dashboard: vitals, appointments and prescriptions
    /// (default)
    Dashboard(Dashboard),

    /// List doctors, optionally filtered by a search query
    ///
    /// The query is matched case-insensitively against name, specialty and
    /// location.
    Doctors(Doctors),

    /// List pharmacy medicines, optionally filtered by a search query
    ///
    /// The query is matched case-insensitively against name and use.
    Medicines(Medicines),

    /// Draw the vitals chart
    Chart(Chart),

    /// Run a sequence of portal events from a script or stdin
    ///
    /// State lives only for the duration of the session.
    Session(Session),

    /// Show or write the configuration file
    Config(config::Command),
}

impl Command {
    fn run(self, context: &Context) -> anyhow::Result<()> {
        match self {
            Self::Dashboard(command) => command.run(context)?,
            Self::Doctors(command) => command.run(context)?,
            Self::Medicines(command) => command.run(context)?,
            Self::Chart(command) => command.run(context)?,
            Self::Session(command) => command.run(context)?,
            Self::Config(command) => command.run(context)?,
        }
        Ok(())
    }
}

/// Output formats for list-style commands.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
