//! End-to-end run: discover, decode, sweep, report

use std::fs;
use std::path::PathBuf;

use crate::config::SweepConfig;
use crate::error::{Result, SweepError};
use crate::report::{CsvSink, ResultSink};
use crate::storage::{discover_sources, load_sources, ImageStore};
use crate::sweep::{SweepCoordinator, SweepProgress, SweepStats};

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stats: SweepStats,
    pub csv_path: PathBuf,
    pub image_root: Option<PathBuf>,
}

/// Run a full porosity sweep as configured.
///
/// Any failure aborts the whole run; the CSV is only flushed once every
/// record and every thresholded image has been written.
pub fn run(config: &SweepConfig, show_progress: bool) -> Result<RunReport> {
    config.validate()?;

    let paths = discover_sources(&config.input_dir)?;
    let strategy = config.strategy(paths.len());
    tracing::info!("Loading {} images with {:?}", paths.len(), strategy);

    let images = load_sources(&paths, strategy.workers())?;
    tracing::info!("Finished loading all images. Starting to process images with B = 0 to 255");

    fs::create_dir_all(&config.output_dir).map_err(|e| SweepError::storage(&config.output_dir, e))?;

    let mut coordinator = SweepCoordinator::new(strategy.clone()).with_writers(config.writer_threads);
    let image_root = if config.save_images {
        coordinator = coordinator.with_image_store(ImageStore::new(&config.output_dir));
        Some(config.output_dir.clone())
    } else {
        None
    };

    let total = coordinator.domain().expected_records(images.len());
    if show_progress && total > 0 {
        coordinator = coordinator.with_progress(SweepProgress::new(total, strategy.workers()));
    }

    let csv_path = config.csv_path();
    let mut sink = CsvSink::create(&csv_path, config.sort_rows)?;
    let outcome = match coordinator.sweep(&images, &mut sink) {
        Ok(outcome) => outcome,
        Err(e) => {
            sink.discard();
            return Err(e);
        }
    };
    sink.finish()?;

    tracing::info!("Wrote {} rows to {}", sink.rows_written(), csv_path.display());
    Ok(RunReport {
        stats: outcome.stats,
        csv_path,
        image_root,
    })
}
