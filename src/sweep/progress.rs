use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Record-level progress for a sweep
///
/// Cloned into the collector; hidden in quiet mode so nothing is drawn.
#[derive(Clone)]
pub struct SweepProgress {
    bar: ProgressBar,
}

impl SweepProgress {
    pub fn new(total_records: usize, workers: usize) -> Self {
        let bar = ProgressBar::new(total_records as u64);
        let style = ProgressStyle::with_template(
            "⚡ [{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} records ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
        bar.set_style(style);
        bar.set_message(format!("[{} workers]", workers));
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn record_received(&self) {
        self.bar.inc(1);
    }

    pub fn threshold_finished(&self, threshold: u8) {
        self.bar.set_message(format!("B={}", threshold));
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}
