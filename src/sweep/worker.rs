use crossbeam::channel::Sender;
use image::RgbaImage;
use std::sync::atomic::{AtomicBool, Ordering};

use super::types::ResultRecord;
use crate::error::Result;
use crate::imaging::{classify, measure};
use crate::sample::parse_key;
use crate::storage::SourceImage;

/// Thresholded image waiting to be persisted
#[derive(Debug)]
pub struct PersistJob {
    pub threshold: u8,
    pub name: String,
    pub image: RgbaImage,
}

/// How a worker left a threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerExit {
    Completed,
    Stopped,
}

/// Per-threshold unit of work over the shared source images
pub struct ThresholdWorker<'a> {
    images: &'a [SourceImage],
    results: Sender<Result<ResultRecord>>,
    persist: Option<Sender<PersistJob>>,
    abort: &'a AtomicBool,
}

impl<'a> ThresholdWorker<'a> {
    pub fn new(
        images: &'a [SourceImage],
        results: Sender<Result<ResultRecord>>,
        persist: Option<Sender<PersistJob>>,
        abort: &'a AtomicBool,
    ) -> Self {
        Self {
            images,
            results,
            persist,
            abort,
        }
    }

    /// Classify, measure and key a single image at one threshold
    pub fn evaluate(image: &SourceImage, threshold: u8) -> Result<(ResultRecord, RgbaImage)> {
        let binary = classify(&image.pixels, threshold);
        let porosity = measure(&binary);
        let key = parse_key(&image.name)?;
        Ok((ResultRecord::new(key, threshold, porosity), binary))
    }

    /// Emit one record per image, in image order, for `threshold`.
    ///
    /// The record is sent before the image is handed to the writers. A key
    /// error is forwarded to the collector and ends this worker's run; a
    /// closed channel or a raised abort flag stops it quietly.
    pub fn run(&self, threshold: u8) -> WorkerExit {
        for image in self.images {
            if self.abort.load(Ordering::Relaxed) {
                return WorkerExit::Stopped;
            }

            let (record, binary) = match Self::evaluate(image, threshold) {
                Ok(evaluated) => evaluated,
                Err(e) => {
                    let _ = self.results.send(Err(e));
                    return WorkerExit::Stopped;
                }
            };

            if self.results.send(Ok(record)).is_err() {
                return WorkerExit::Stopped; // Collector dropped
            }
            tracing::trace!("Processed {} with B={}", image.name, threshold);

            if let Some(persist) = &self.persist {
                let job = PersistJob {
                    threshold,
                    name: image.name.clone(),
                    image: binary,
                };
                if persist.send(job).is_err() {
                    return WorkerExit::Stopped; // Writers gone
                }
            }
        }

        WorkerExit::Completed
    }
}
