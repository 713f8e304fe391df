//! Parsers for the tabular inputs of a resolution run.
//!
//! - **Genotype query files**: `rsid<TAB>chromosome<TAB>position[...]`, plain or
//!   gzip-compressed, read lazily one query at a time
//! - **Contig maps**: `label<TAB>accession` tables that replace the built-in
//!   chromosome to accession mapping
//!
//! ## Example
//!
//! ```rust,no_run
//! use rsid_resolver::parsing::genotype::QueryReader;
//! use std::path::Path;
//!
//! let reader = QueryReader::open(Path::new("genotypes.txt"), Some(100)).unwrap();
//! for query in reader {
//!     let query = query.unwrap();
//!     println!("{} {}:{}", query.rsid, query.chrom, query.pos);
//! }
//! ```

use thiserror::Error;

pub mod genotype;
pub mod tsv;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Too many contigs: {0} exceeds maximum allowed (100000)")]
    TooManyContigs(usize),
}
