use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::ResultSink;
use crate::error::{Result, SweepError};
use crate::sweep::ResultRecord;

/// Header row of the porosity table
pub const HEADER: &str = "Sample Number,Iteration Number,Porosity,Direction,B";

/// Format one record as a CSV row (without line terminator)
pub fn format_row(record: &ResultRecord) -> String {
    format!(
        "{},{},{:.2},{},{}",
        record.sample, record.iteration, record.porosity, record.direction, record.threshold
    )
}

/// Suffix of the staging file a [`CsvSink::create`] sink writes into
const PARTIAL_SUFFIX: &str = ".partial";

/// CSV writer for sweep records
///
/// The header is written on creation. Rows are streamed in arrival order
/// unless `sort_rows` is set, in which case they are buffered and written
/// sorted by (sample, iteration, direction, threshold) on `finish`.
pub struct CsvSink<W: Write> {
    writer: W,
    path: PathBuf,
    sort_rows: bool,
    pending: Vec<ResultRecord>,
    rows_written: usize,
    /// Final path the staged file is renamed to on `finish`
    target: Option<PathBuf>,
}

impl CsvSink<BufWriter<File>> {
    /// Stage the CSV next to `path`; it only appears at `path` after `finish`.
    pub fn create(path: &Path, sort_rows: bool) -> Result<Self> {
        let staging = staging_path(path);
        let file = File::create(&staging).map_err(|e| SweepError::storage(&staging, e))?;
        let mut sink = Self::from_writer(BufWriter::new(file), staging, sort_rows)?;
        sink.target = Some(path.to_path_buf());
        Ok(sink)
    }

    /// Drop an unfinished sink and remove its staging file
    pub fn discard(self) {
        let staging = self.path.clone();
        drop(self.writer);
        if let Err(e) = fs::remove_file(&staging) {
            tracing::debug!("Could not remove {}: {}", staging.display(), e);
        }
    }
}

/// `<path>.partial`, the in-progress name of a CSV file
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

impl<W: Write> CsvSink<W> {
    /// Wrap any writer; `path` only labels errors
    pub fn from_writer(writer: W, path: impl Into<PathBuf>, sort_rows: bool) -> Result<Self> {
        let mut sink = Self {
            writer,
            path: path.into(),
            sort_rows,
            pending: Vec::new(),
            rows_written: 0,
            target: None,
        };
        sink.write_line(HEADER)?;
        Ok(sink)
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line).map_err(|e| SweepError::storage(&self.path, e))
    }

    fn write_record(&mut self, record: &ResultRecord) -> Result<()> {
        self.write_line(&format_row(record))?;
        self.rows_written += 1;
        Ok(())
    }
}

impl<W: Write> ResultSink for CsvSink<W> {
    fn accept(&mut self, record: ResultRecord) -> Result<()> {
        if self.sort_rows {
            self.pending.push(record);
            return Ok(());
        }
        self.write_record(&record)
    }

    fn finish(&mut self) -> Result<()> {
        if !self.pending.is_empty() {
            let mut pending = std::mem::take(&mut self.pending);
            pending.sort_by_key(|record| record.key());
            for record in &pending {
                self.write_record(record)?;
            }
        }

        self.writer.flush().map_err(|e| SweepError::storage(&self.path, e))?;
        if let Some(target) = self.target.take() {
            fs::rename(&self.path, &target).map_err(|e| SweepError::storage(&target, e))?;
            self.path = target;
        }
        tracing::debug!("Wrote {} rows to {}", self.rows_written, self.path.display());
        Ok(())
    }
}
