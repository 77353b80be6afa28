//! Result sinks drained by the sweep coordinator
//!
//! Records arrive in completion order, not threshold or image order. A sink
//! that needs a stable order must buffer and sort by the record key itself.

pub mod csv;

use crate::error::Result;
use crate::sweep::ResultRecord;

pub use self::csv::CsvSink;

/// Destination for sweep records
pub trait ResultSink {
    /// Accept one record; called exactly once per (image, threshold) pair
    fn accept(&mut self, record: ResultRecord) -> Result<()>;

    /// Flush everything; called once after a successful sweep
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Sink that keeps records in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<ResultRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_records(self) -> Vec<ResultRecord> {
        self.records
    }
}

impl ResultSink for MemorySink {
    fn accept(&mut self, record: ResultRecord) -> Result<()> {
        self.records.push(record);
        Ok(())
    }
}
