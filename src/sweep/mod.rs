//! Parallel threshold sweep
//!
//! One unit of work per threshold value, spread over a worker pool. Each
//! worker classifies every source image at its threshold, measures porosity
//! and emits one [`ResultRecord`] per image into a channel sized to the total
//! record count. The coordinator drains exactly that many records.

pub mod coordinator;
pub mod progress;
pub mod types;
pub mod worker;

pub use coordinator::SweepCoordinator;
pub use progress::SweepProgress;
pub use types::{ResultRecord, SweepOutcome, SweepStats, ThresholdDomain};
pub use worker::{PersistJob, ThresholdWorker, WorkerExit};
