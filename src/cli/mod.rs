//! Command-line interface for porosity-sweep
//!
//! Parses arguments with clap, sets up tracing, and dispatches to the command
//! implementations. Running without a command performs a sweep with the
//! configured (or default) folders.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;
mod output;

pub use output::Output;

use commands::{config, key, sweep, version};

/// Porosity threshold sweep for binary-phase micrographs
#[derive(Parser)]
#[command(
    name = "porosity",
    author,
    version,
    about = "Measure micrograph porosity at every brightness threshold from 0 to 255",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", value_name = "DIR", global = true)]
    pub directory: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the threshold sweep (default)
    Sweep(sweep::SweepArgs),
    /// Parse sample keys from file names
    Key(key::KeyArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Show version information
    Version,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);
        let config_path = self.config.as_deref();

        match self.command {
            Some(Commands::Sweep(args)) => sweep::execute(args, config_path, &output).await,
            Some(Commands::Key(args)) => key::execute(args, &output).await,
            Some(Commands::Config(args)) => config::execute(args, config_path, &output).await,
            Some(Commands::Version) => version::execute(&output).await,
            None => sweep::execute(sweep::SweepArgs::default(), config_path, &output).await,
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => tracing_subscriber::EnvFilter::new("warn"),
        1 => tracing_subscriber::EnvFilter::new("info"),
        2 => tracing_subscriber::EnvFilter::new("debug"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
