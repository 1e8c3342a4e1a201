use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, Select};
use std::path::PathBuf;
use taf_core::{Config, IssueMonth, Minima, OutputFormat, ParsedBulletin};
use tracing::warn;

use crate::{render, source::Source};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "taf", version, about = "Decode aviation terminal forecasts (TAF)")]
pub struct Cli {
    /// Log decoder activity to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Where to read the bulletin from.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Bulletin text. Read from stdin when omitted.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,

    /// Read the bulletin from a file instead.
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode a bulletin and show each forecast group.
    Decode {
        #[command(flatten)]
        input: InputArgs,

        /// Output format, "text" or "json". Defaults to the configured format.
        #[arg(long)]
        format: Option<String>,

        /// Month the bulletin was issued in (YYYY-MM), used to print absolute times.
        #[arg(long)]
        month: Option<String>,
    },

    /// Print a plain-language summary of a bulletin.
    Summary {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Interactively set decode minima and the default output format.
    Configure,

    /// Inspect the configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the configuration file path.
    Path,
    /// Print the effective configuration.
    Show,
}

fn decode_input(config: &Config, input: InputArgs) -> anyhow::Result<ParsedBulletin> {
    let text = Source::from_args(input.text, input.file).read()?;
    let bulletin = config.decoder().decode(&text);

    if bulletin.is_unparsed() {
        bail!("Could not parse the bulletin: no station and no forecast groups found.");
    }
    if bulletin.station == taf_core::model::UNKNOWN {
        warn!("no station identifier found in bulletin");
    }
    Ok(bulletin)
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let ceiling = CustomType::<u16>::new("Ceiling minimum (hundreds of feet):")
        .with_default(config.minima.ceiling_hundreds_ft)
        .with_error_message("Please enter a whole number, e.g. 15 for 1,500 ft")
        .prompt()?;

    let visibility = CustomType::<u32>::new("Visibility minimum (meters):")
        .with_default(config.minima.visibility_m)
        .with_error_message("Please enter a whole number of meters, e.g. 8000")
        .prompt()?;

    let format = Select::new("Default output format:", OutputFormat::all().to_vec()).prompt()?;

    config.set_minima(Minima { ceiling_hundreds_ft: ceiling, visibility_m: visibility })?;
    config.set_default_format(format);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Decode { input, format, month } => {
                let config = Config::load()?;
                let format = match format {
                    Some(f) => OutputFormat::try_from(f.as_str())?,
                    None => config.default_format()?,
                };
                let month = month.map(|m| m.parse::<IssueMonth>()).transpose()?;

                let bulletin = decode_input(&config, input)?;
                match format {
                    OutputFormat::Text => print!("{}", render::timeline(&bulletin, month)),
                    OutputFormat::Json => println!(
                        "{}",
                        serde_json::to_string_pretty(&bulletin)
                            .context("Failed to serialize bulletin to JSON")?
                    ),
                }
            }
            Command::Summary { input } => {
                let config = Config::load()?;
                let bulletin = decode_input(&config, input)?;
                print!("{}", render::summary(&bulletin));
            }
            Command::Configure => configure(Config::load()?)?,
            Command::Config { action: ConfigAction::Path } => {
                println!("{}", Config::config_file_path()?.display());
            }
            Command::Config { action: ConfigAction::Show } => {
                let config = Config::load()?;
                println!("default_format = {}", config.default_format()?);
                println!("ceiling_hundreds_ft = {}", config.minima.ceiling_hundreds_ft);
                println!("visibility_m = {}", config.minima.visibility_m);
            }
        }

        Ok(())
    }
}
