//! Configuration command implementations

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use crate::cli::Output;
use crate::config::PorosityConfig;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the merged configuration
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

pub async fn execute(args: ConfigArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    match args.command {
        ConfigCommands::Show { format } => show(config_path, format, output),
    }
}

fn show(config_path: Option<&str>, format: ConfigFormat, output: &Output) -> Result<()> {
    let config = PorosityConfig::load_with_overrides(config_path, None::<()>)?;
    // Validate before printing so a bad value is reported instead of echoed
    config.sweep()?;
    let merged = config.get_full_config()?;

    let rendered = match format {
        ConfigFormat::Toml => toml::to_string_pretty(&merged)?,
        ConfigFormat::Json => serde_json::to_string_pretty(&merged)?,
    };
    output.plain(rendered.trim_end());
    Ok(())
}
