use crossbeam::channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use super::progress::SweepProgress;
use super::types::{ResultRecord, SweepOutcome, SweepStats, ThresholdDomain};
use super::worker::{PersistJob, ThresholdWorker, WorkerExit};
use crate::error::{Result, SweepError};
use crate::parallel::ExecutionStrategy;
use crate::report::ResultSink;
use crate::storage::{ImageStore, SourceImage};

/// Writer channel buffer = writers * multiplier
const PERSIST_BUFFER_MULTIPLIER: usize = 2;

/// Fans the threshold domain out over a worker pool and drains every record
/// into a sink.
///
/// The result channel is sized to exactly `images * thresholds`, so workers
/// never wait on the collector. Thresholded images go to a separate pool of
/// writer threads that is joined before `sweep` returns.
pub struct SweepCoordinator {
    domain: ThresholdDomain,
    strategy: ExecutionStrategy,
    writers: usize,
    store: Option<ImageStore>,
    progress: SweepProgress,
}

impl SweepCoordinator {
    pub fn new(strategy: ExecutionStrategy) -> Self {
        let writers = strategy.workers();
        Self {
            domain: ThresholdDomain::full(),
            strategy,
            writers,
            store: None,
            progress: SweepProgress::hidden(),
        }
    }

    /// Persist every thresholded image into `store`
    pub fn with_image_store(mut self, store: ImageStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Number of writer threads (0 keeps the worker count)
    pub fn with_writers(mut self, writers: usize) -> Self {
        if writers > 0 {
            self.writers = writers;
        }
        self
    }

    pub fn with_progress(mut self, progress: SweepProgress) -> Self {
        self.progress = progress;
        self
    }

    pub fn domain(&self) -> &ThresholdDomain {
        &self.domain
    }

    /// Run every threshold over every image.
    ///
    /// Exactly `images.len() * 256` records reach `sink` on success. The first
    /// error from any worker, writer or the sink stops the run; remaining
    /// threads are joined before it is returned.
    pub fn sweep(&self, images: &[SourceImage], sink: &mut dyn ResultSink) -> Result<SweepOutcome> {
        let start_time = Instant::now();

        if let Some(store) = &self.store {
            store.prepare(&self.domain)?;
        }

        let expected = self.domain.expected_records(images.len());
        let workers = std::cmp::min(self.strategy.workers(), self.domain.len().max(1));
        let writers = if self.store.is_some() { self.writers.max(1) } else { 0 };

        tracing::info!(
            "Sweeping {} images over {} thresholds ({} records, {} workers, {} writers)",
            images.len(),
            self.domain.len(),
            expected,
            workers,
            writers
        );

        if expected == 0 {
            self.progress.finish();
            return Ok(self.outcome(images.len(), 0, 0, workers, writers, start_time));
        }

        let (threshold_tx, threshold_rx): (Sender<u8>, Receiver<u8>) = bounded(self.domain.len());
        for threshold in self.domain.values() {
            // Capacity covers the whole domain
            let _ = threshold_tx.send(threshold);
        }
        drop(threshold_tx);

        let (result_tx, result_rx): (Sender<Result<ResultRecord>>, Receiver<Result<ResultRecord>>) =
            bounded(expected);
        let (persist_tx, persist_rx): (Sender<PersistJob>, Receiver<PersistJob>) =
            bounded(writers.max(1) * PERSIST_BUFFER_MULTIPLIER);
        let abort = AtomicBool::new(false);

        // Use crossbeam::thread::scope for safe borrowing of images
        let scoped = crossbeam::thread::scope(|s| -> Result<(usize, usize)> {
            let mut writer_handles = Vec::with_capacity(writers);
            if let Some(store) = &self.store {
                for writer_id in 0..writers {
                    let persist_rx = persist_rx.clone();
                    let abort = &abort;
                    writer_handles.push(s.spawn(move |_| Self::writer_thread(writer_id, store, persist_rx, abort)));
                }
            }
            drop(persist_rx);

            let mut worker_handles = Vec::with_capacity(workers);
            for worker_id in 0..workers {
                let threshold_rx = threshold_rx.clone();
                let persist = self.store.as_ref().map(|_| persist_tx.clone());
                let worker = ThresholdWorker::new(images, result_tx.clone(), persist, &abort);
                let progress = self.progress.clone();

                worker_handles.push(s.spawn(move |_| {
                    while let Ok(threshold) = threshold_rx.recv() {
                        if worker.run(threshold) == WorkerExit::Stopped {
                            tracing::debug!("Worker {} stopped at B={}", worker_id, threshold);
                            break;
                        }
                        progress.threshold_finished(threshold);
                    }
                }));
            }

            // Drop the original senders so receivers know when work is done
            drop(result_tx);
            drop(persist_tx);

            let collected = self.collect_results(result_rx, expected, sink);
            if collected.is_err() {
                abort.store(true, Ordering::Relaxed);
            }

            let mut panicked = false;
            for handle in worker_handles {
                panicked |= handle.join().is_err();
            }

            let mut images_written = 0;
            let mut writer_error = None;
            for handle in writer_handles {
                match handle.join() {
                    Ok(Ok(written)) => images_written += written,
                    Ok(Err(e)) => {
                        writer_error.get_or_insert(e);
                    }
                    Err(_) => panicked = true,
                }
            }

            match (collected, writer_error) {
                (Err(e), _) if !matches!(e, SweepError::WorkerPanic(_)) => Err(e),
                (_, Some(e)) => Err(e),
                _ if panicked => Err(SweepError::WorkerPanic("threshold sweep")),
                (collected, None) => collected.map(|records| (records, images_written)),
            }
        })
        .map_err(|_| SweepError::WorkerPanic("threshold sweep"))?;

        self.progress.finish();
        let (records, images_written) = scoped?;

        let outcome = self.outcome(images.len(), records, images_written, workers, writers, start_time);
        tracing::info!(
            "Sweep completed in {:.2}s ({} records, {} images written)",
            outcome.stats.duration_ms as f64 / 1000.0,
            records,
            images_written
        );
        Ok(outcome)
    }

    /// Receive exactly `total` records, forwarding each to the sink
    fn collect_results(
        &self,
        result_rx: Receiver<Result<ResultRecord>>,
        total: usize,
        sink: &mut dyn ResultSink,
    ) -> Result<usize> {
        let mut received = 0;

        while received < total {
            match result_rx.recv() {
                Ok(Ok(record)) => {
                    sink.accept(record)?;
                    received += 1;
                    self.progress.record_received();
                }
                Ok(Err(e)) => return Err(e),
                // Every worker exited without producing the full count
                Err(_) => return Err(SweepError::WorkerPanic("threshold sweep")),
            }
        }

        Ok(received)
    }

    /// Drain persist jobs until every worker is done; returns images written
    fn writer_thread(
        writer_id: usize,
        store: &ImageStore,
        persist_rx: Receiver<PersistJob>,
        abort: &AtomicBool,
    ) -> Result<usize> {
        let mut written = 0;
        while let Ok(job) = persist_rx.recv() {
            if let Err(e) = store.write(job.threshold, &job.name, &job.image) {
                tracing::debug!("Writer {} failed: {}", writer_id, e);
                abort.store(true, Ordering::Relaxed);
                return Err(e);
            }
            written += 1;
        }
        Ok(written)
    }

    fn outcome(
        &self,
        images: usize,
        records: usize,
        images_written: usize,
        workers: usize,
        writers: usize,
        start_time: Instant,
    ) -> SweepOutcome {
        SweepOutcome {
            stats: SweepStats {
                images,
                thresholds: self.domain.len(),
                records,
                images_written,
                workers,
                writers,
                duration_ms: start_time.elapsed().as_millis() as u64,
            },
        }
    }
}
