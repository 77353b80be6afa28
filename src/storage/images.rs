use image::{ImageError, ImageFormat, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SweepError};
use crate::sweep::ThresholdDomain;

/// Output layout for thresholded images: `<root>/<threshold>/<source name>`
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn threshold_dir(&self, threshold: u8) -> PathBuf {
        self.root.join(threshold.to_string())
    }

    pub fn image_path(&self, threshold: u8, name: &str) -> PathBuf {
        self.threshold_dir(threshold).join(name)
    }

    /// Create every per-threshold directory before any image targets it
    pub fn prepare(&self, domain: &ThresholdDomain) -> Result<()> {
        for threshold in domain.values() {
            let dir = self.threshold_dir(threshold);
            fs::create_dir_all(&dir).map_err(|e| SweepError::storage(&dir, e))?;
        }
        tracing::debug!("Prepared {} threshold directories under {}", domain.len(), self.root.display());
        Ok(())
    }

    /// PNG-encode `image` under the source file's own name, whatever its extension
    pub fn write(&self, threshold: u8, name: &str, image: &RgbaImage) -> Result<PathBuf> {
        let path = self.image_path(threshold, name);
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| match e {
                ImageError::IoError(source) => SweepError::storage(&path, source),
                source => SweepError::Encode {
                    path: path.clone(),
                    source,
                },
            })?;
        tracing::trace!("Wrote {}", path.display());
        Ok(path)
    }
}
