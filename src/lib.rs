//! # porosity-sweep
//!
//! Measures the porosity of binary-phase micrographs at every brightness
//! threshold from 0 to 255.
//!
//! Each source image is keyed by a `<sample>-<iteration><H|V>` file name. For
//! every threshold the blue channel is cut into black (pore) and white
//! (solid), the black share is recorded as a percentage, and optionally the
//! thresholded image is written under `<output>/<threshold>/`.
//!
//! ## Quick Start
//!
//! ```bash
//! # Sweep ./original into ./processed
//! porosity
//!
//! # Custom folders, CSV only
//! porosity sweep --input scans --output results --no-images
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod imaging;
pub mod parallel;
pub mod pipeline;
pub mod report;
pub mod sample;
pub mod storage;
pub mod sweep;

pub use cli::{Cli, Output};
pub use config::{PorosityConfig, SweepConfig};
pub use error::{Result, SweepError};
pub use report::{CsvSink, MemorySink, ResultSink};
pub use sample::{parse_key, Direction, SampleKey};
pub use sweep::{ResultRecord, SweepCoordinator};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
