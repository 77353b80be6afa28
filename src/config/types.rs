use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::SweepError;
use crate::parallel::ExecutionStrategy;

/// Processing mode for the threshold sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Choose by image count (smart default)
    #[default]
    Auto,
    /// Always use the worker pool
    Parallel,
    /// One worker thread
    Sequential,
}

/// `[sweep]` section of the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub csv_name: String,
    pub save_images: bool,
    pub sort_rows: bool,
    pub mode: ExecutionMode,
    pub max_threads: usize,
    pub thread_percentage: u8,
    pub writer_threads: usize,
    pub min_images_for_parallel: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./original"),
            output_dir: PathBuf::from("./processed"),
            csv_name: "porosity.csv".to_string(),
            save_images: true,
            sort_rows: false,
            mode: ExecutionMode::Auto,
            max_threads: 0,
            thread_percentage: 100,
            writer_threads: 0,
            min_images_for_parallel: 1,
        }
    }
}

impl SweepConfig {
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(&self.csv_name)
    }

    pub fn validate(&self) -> Result<(), SweepError> {
        if !(1..=100).contains(&self.thread_percentage) {
            return Err(SweepError::Configuration(format!(
                "thread_percentage must be between 1 and 100, got {}",
                self.thread_percentage
            )));
        }
        if self.csv_name.trim().is_empty() {
            return Err(SweepError::Configuration("csv_name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Resolve the configured mode into a concrete strategy for `image_count` images
    pub fn strategy(&self, image_count: usize) -> ExecutionStrategy {
        let max_workers = ExecutionStrategy::calculate_optimal_workers(self.max_threads, self.thread_percentage);
        match self.mode {
            ExecutionMode::Sequential => ExecutionStrategy::Sequential,
            ExecutionMode::Parallel => ExecutionStrategy::Parallel { workers: max_workers },
            ExecutionMode::Auto => ExecutionStrategy::auto(image_count, self.min_images_for_parallel, max_workers),
        }
    }
}
