//! Reader for genotype query files.
//!
//! Each non-comment line is tab-delimited with at least three fields: rsid,
//! chromosome label, position. Comment lines start with `#`. Lines with fewer
//! fields or a position that is not a non-negative integer are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::debug;

use crate::core::types::Query;
use crate::parsing::ParseError;

/// Outcome of parsing one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Query(Query),
    Comment,
    Skipped,
}

/// Parse a single query line
#[must_use]
pub fn parse_line(raw: &str) -> ParsedLine {
    if raw.starts_with('#') {
        return ParsedLine::Comment;
    }

    let line = raw.trim();
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 3 {
        return ParsedLine::Skipped;
    }

    match fields[2].trim().parse::<u64>() {
        Ok(pos) => ParsedLine::Query(Query::new(fields[0], fields[1], pos)),
        Err(_) => ParsedLine::Skipped,
    }
}

/// Lazy, single-pass iterator of queries from a line source
pub struct QueryReader<R> {
    reader: R,
    limit: Option<usize>,
    yielded: usize,
    skipped: usize,
    line_num: usize,
    buffer: String,
}

impl<R: BufRead> QueryReader<R> {
    /// `limit` caps the number of queries yielded; `None` or `Some(0)` reads
    /// everything
    pub fn new(reader: R, limit: Option<usize>) -> Self {
        Self {
            reader,
            limit: limit.filter(|&n| n > 0),
            yielded: 0,
            skipped: 0,
            line_num: 0,
            buffer: String::new(),
        }
    }

    /// Malformed lines dropped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl QueryReader<Box<dyn BufRead>> {
    /// Open a query file; `.gz` files are decompressed on the fly
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be opened.
    pub fn open(path: &Path, limit: Option<usize>) -> Result<Self, ParseError> {
        let file = File::open(path)?;
        let is_gzip = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

        let reader: Box<dyn BufRead> = if is_gzip {
            Box::new(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        Ok(Self::new(reader, limit))
    }
}

impl<R: BufRead> Iterator for QueryReader<R> {
    type Item = Result<Query, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.limit.is_some_and(|limit| self.yielded >= limit) {
            return None;
        }

        loop {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_num += 1;

            match parse_line(&self.buffer) {
                ParsedLine::Query(query) => {
                    self.yielded += 1;
                    return Some(Ok(query));
                }
                ParsedLine::Comment => {}
                ParsedLine::Skipped => {
                    self.skipped += 1;
                    debug!(line = self.line_num, "Skipping malformed query line");
                }
            }
        }
    }
}
