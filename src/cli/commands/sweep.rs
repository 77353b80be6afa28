use anyhow::{Context, Result};
use clap::Args;
use serde_json::{Map, Value, json};
use std::path::PathBuf;

use crate::cli::Output;
use crate::config::{ExecutionMode, PorosityConfig, SweepConfig};
use crate::pipeline::{self, RunReport};

#[derive(Args, Debug, Default)]
pub struct SweepArgs {
    /// Folder containing the source micrographs
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Folder receiving the CSV and the per-threshold image folders
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// CSV file name inside the output folder
    #[arg(long, value_name = "NAME")]
    pub csv: Option<String>,

    /// Skip writing thresholded images
    #[arg(long)]
    pub no_images: bool,

    /// Sort CSV rows by sample, iteration, direction and threshold
    #[arg(long)]
    pub sorted: bool,

    /// Execution mode
    #[arg(long, value_enum)]
    pub mode: Option<ExecutionMode>,

    /// Maximum number of threshold workers (0 = auto)
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,
}

impl SweepArgs {
    /// Only flags the user actually passed become overrides
    fn overrides(&self) -> Value {
        let mut sweep = Map::new();

        if let Some(input) = &self.input {
            sweep.insert("input_dir".into(), json!(input));
        }
        if let Some(output) = &self.output {
            sweep.insert("output_dir".into(), json!(output));
        }
        if let Some(csv) = &self.csv {
            sweep.insert("csv_name".into(), json!(csv));
        }
        if self.no_images {
            sweep.insert("save_images".into(), json!(false));
        }
        if self.sorted {
            sweep.insert("sort_rows".into(), json!(true));
        }
        if let Some(mode) = self.mode {
            sweep.insert("mode".into(), json!(mode));
        }
        if let Some(threads) = self.threads {
            sweep.insert("max_threads".into(), json!(threads));
        }

        json!({ "sweep": sweep })
    }
}

pub async fn execute(args: SweepArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let config = PorosityConfig::load_with_overrides(config_path, Some(args.overrides()))?;
    let sweep = config.sweep()?;

    output.verbose(&format!("Input folder: {}", sweep.input_dir.display()));
    output.verbose(&format!("Output folder: {}", sweep.output_dir.display()));

    let show_progress = !output.is_quiet();
    let job_config = sweep.clone();
    let report = tokio::task::spawn_blocking(move || pipeline::run(&job_config, show_progress))
        .await
        .context("Sweep task failed to complete")?
        .with_context(|| {
            format!(
                "Sweep of {} into {} aborted",
                sweep.input_dir.display(),
                sweep.output_dir.display()
            )
        })?;

    display_report(&sweep, &report, output);
    Ok(())
}

fn display_report(config: &SweepConfig, report: &RunReport, output: &Output) {
    let stats = &report.stats;

    output.header("Porosity Sweep");
    output.key_value("Images", &stats.images.to_string(), false);
    output.key_value("Thresholds", &stats.thresholds.to_string(), false);
    output.key_value("Records", &stats.records.to_string(), true);
    output.key_value("Workers", &stats.workers.to_string(), false);
    if let Some(root) = &report.image_root {
        output.key_value("Images written", &stats.images_written.to_string(), false);
        output.key_value("Image folders", &root.display().to_string(), false);
    }
    output.key_value("CSV", &report.csv_path.display().to_string(), false);
    output.key_value("Duration", &format!("{} ms", stats.duration_ms), false);

    if config.sort_rows {
        output.verbose("Rows sorted by sample key and threshold");
    }

    output.success("Finished processing all images");
}
