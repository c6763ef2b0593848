//! # Result Writer Module
//!
//! Streams [`MatchRecord`]s to a CSV sink. The header row is written as soon
//! as the writer is created, so a run without any match still produces a
//! valid, header-only table.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::record::{MatchRecord, COLUMNS};

pub use error::WriterError;

mod error;

/// Statistics from a completed write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterStats {
    /// Number of data rows written (header excluded)
    pub rows_written: usize,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wrote {} match rows", self.rows_written)
    }
}

/// CSV writer for match rows
pub struct ResultWriter<W: Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

impl ResultWriter<File> {
    /// Create (or truncate) a CSV file and write its header
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, WriterError> {
        let file = File::create(path.as_ref())?;
        Self::new(file)
    }
}

impl<W: Write> ResultWriter<W> {
    /// Wrap a sink and write the header row
    pub fn new(inner: W) -> Result<Self, WriterError> {
        // Headers are written by hand so they appear even with zero rows
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        writer.write_record(COLUMNS)?;

        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    /// Append one row
    pub fn write_record(&mut self, record: &MatchRecord) -> Result<(), WriterError> {
        self.writer.serialize(record)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Append several rows
    pub fn write_records(&mut self, records: &[MatchRecord]) -> Result<(), WriterError> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Push buffered rows to the underlying sink
    pub fn flush(&mut self) -> Result<(), WriterError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of data rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Get the current statistics
    pub fn stats(&self) -> WriterStats {
        WriterStats {
            rows_written: self.rows_written,
        }
    }

    /// Flush and return the underlying sink
    pub fn into_inner(self) -> Result<W, WriterError> {
        self.writer
            .into_inner()
            .map_err(|e| WriterError::IoError(e.into_error()))
    }

    /// Flush and return the final statistics
    pub fn finish(mut self) -> Result<WriterStats, WriterError> {
        self.flush()?;
        Ok(self.stats())
    }
}
