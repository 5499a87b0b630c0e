use std::path::PathBuf;

use tracing::instrument;

use super::{Context, terminal::Colorize};

#[derive(Debug, clap::Parser)]
/// Show or write the portal configuration
///
/// Configuration is a TOML file passed with --config. Without one, defaults
/// are used.
///
/// Available configuration keys:
///   `canvas_width`   Width of the vitals chart in pixels (default: 640)
///   `canvas_height`  Height of the vitals chart in pixels (default: 260)
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show the effective configuration as TOML
    Show,

    /// Write the effective configuration to a file
    ///
    /// Combine with --config to copy an existing file, or omit it to write the
    /// defaults.
    Write {
        /// Destination path
        path: PathBuf,

        /// Override the chart canvas width
        #[arg(long)]
        width: Option<u32>,

        /// Override the chart canvas height
        #[arg(long)]
        height: Option<u32>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Command {
    #[instrument(skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let mut config = context.config()?;

        match self.command {
            ConfigCommand::Show => {
                let toml = config.to_toml().map_err(|e| anyhow::anyhow!("{e}"))?;
                print!("{toml}");
            }
            ConfigCommand::Write {
                path,
                width,
                height,
                force,
            } => {
                if path.exists() && !force {
                    anyhow::bail!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    );
                }
                let (current_width, current_height) =
                    (config.canvas_width(), config.canvas_height());
                config
                    .set_canvas_size(
                        width.unwrap_or(current_width),
                        height.unwrap_or(current_height),
                    )
                    .map_err(|e| anyhow::anyhow!("{e}"))?;
                config.save(&path).map_err(|e| anyhow::anyhow!("{e}"))?;
                println!(
                    "{}",
                    format!("Wrote configuration to {}", path.display()).success()
                );
            }
        }
        Ok(())
    }
}
