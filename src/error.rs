//! Error types for the porosity sweep
//!
//! Every variant is fatal for the run. Workers report errors to the
//! coordinator instead of exiting, and the CLI decides how to surface them.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sweep operations
#[derive(Error, Debug)]
pub enum SweepError {
    /// Input directory missing/unreadable or invalid configuration values
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Source image could not be read or decoded
    #[error("Failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// File name does not carry a `<sample>-<iteration><H|V>` key
    #[error("File name '{name}' does not match <sample>-<iteration><H|V>")]
    KeyFormat { name: String },

    /// Output directory, image or CSV could not be written
    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Thresholded image could not be encoded
    #[error("Failed to encode image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A worker thread panicked
    #[error("Thread panic occurred during {0}")]
    WorkerPanic(&'static str),
}

impl SweepError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SweepError::Storage {
            path: path.into(),
            source,
        }
    }
}

/// Convenience Result type for sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;
