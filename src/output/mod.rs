//! CSV output channels for resolved rows.
//!
//! A [`ResultChannel`] writes its header together with its first row, taking
//! the column names from that row's fields. A channel that never receives a
//! row leaves its sink untouched.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::core::types::ResultRow;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub struct ResultChannel<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl<W: Write> ResultChannel<W> {
    pub fn new(sink: W) -> Self {
        // csv emits the header from the first serialized row, never earlier
        let writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(sink);
        Self { writer, rows: 0 }
    }

    /// Append a row, preceded by the header if this is the channel's first row
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if the row cannot be serialized or written.
    pub fn write(&mut self, row: &ResultRow) -> Result<(), OutputError> {
        self.writer.serialize(row)?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush buffered rows
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if the flush fails.
    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying sink
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if buffered rows cannot be flushed.
    pub fn into_inner(self) -> Result<W, OutputError> {
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }
}

impl ResultChannel<BufWriter<File>> {
    /// Create (or truncate) `path`, creating missing parent directories
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Io` if the directories or file cannot be created.
    pub fn create(path: &Path) -> Result<Self, OutputError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}
