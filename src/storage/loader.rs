use image::{ImageError, ImageReader};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Result, SweepError};
use crate::imaging::Rgba16Image;

/// Decoded source micrograph, shared read-only by every threshold worker
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Original file name; carries the sample key and names every output image
    pub name: String,
    pub pixels: Rgba16Image,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, pixels: Rgba16Image) -> Self {
        Self {
            name: name.into(),
            pixels,
        }
    }

    /// Decode an image file, sniffing the format from its content
    pub fn load(path: &Path) -> Result<Self> {
        let decode_error = |source: ImageError| SweepError::Decode {
            path: path.to_path_buf(),
            source,
        };

        let pixels = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| decode_error(ImageError::IoError(e)))?
            .decode()
            .map_err(decode_error)?
            .to_rgba16();

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        tracing::trace!("Decoded {} ({}x{})", name, pixels.width(), pixels.height());
        Ok(Self { name, pixels })
    }
}

/// List the regular files directly inside `dir`, sorted by file name
pub fn discover_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(SweepError::Configuration(format!(
            "input directory {} does not exist or is not a directory",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            SweepError::Configuration(format!("cannot read input directory {}: {}", dir.display(), e))
        })?;

        if entry.file_type().is_file() {
            files.push(entry.into_path());
        } else {
            tracing::debug!("Skipping non-file entry {}", entry.path().display());
        }
    }

    tracing::info!("Discovered {} source images in {}", files.len(), dir.display());
    Ok(files)
}

/// Decode every path on a pool of `workers` threads, preserving input order.
///
/// The first decode failure aborts loading.
pub fn load_sources(paths: &[PathBuf], workers: usize) -> Result<Vec<SourceImage>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .thread_name(|index| format!("decode-{}", index))
        .build()
        .map_err(|e| SweepError::Configuration(format!("cannot start decode pool: {}", e)))?;

    pool.install(|| paths.par_iter().map(|path| SourceImage::load(path)).collect())
}
