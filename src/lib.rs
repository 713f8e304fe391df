//! # rsid-resolver
//!
//! A library for reconciling genotype records against a position-indexed
//! reference variant database such as dbSNP.
//!
//! Consumer genotype files list variants as `rsid`, chromosome label and
//! position. Labels are loose (`7`, `chr7`, `CHR7`), coordinates drift between
//! builds, and the reference VCF may carry an rsid in its ID column or only as
//! a numeric `RS` INFO value.
//!
//! `rsid-resolver` maps each label to the reference's contig accession, looks
//! the rsid up at the exact position, optionally falls back to a window around
//! it, and writes every query to one of two CSV files.
//!
//! ## Features
//!
//! - **Contig normalization**: `GRCh38`/`GRCh37` `RefSeq` tables or a custom map
//! - **Identity union**: ID column tokens and `RS` cross-references both count
//! - **Window fallback**: tolerate small coordinate differences
//! - **Indexed or in-memory stores**: tabix-indexed `.vcf.gz` or plain `.vcf`
//! - **Streaming output**: CSV headers are written only for non-empty outputs
//!
//! ## Example
//!
//! ```rust,no_run
//! use rsid_resolver::core::contig::ContigTable;
//! use rsid_resolver::matching::engine::Resolver;
//! use rsid_resolver::output::ResultChannel;
//! use rsid_resolver::parsing::genotype::QueryReader;
//! use rsid_resolver::store;
//! use std::path::Path;
//!
//! let store = store::open(Path::new("GCF_000001405.40.gz")).unwrap();
//! let contigs = ContigTable::default();
//! let queries = QueryReader::open(Path::new("genome.txt"), None).unwrap();
//!
//! let mut exact = ResultChannel::create(Path::new("exact.csv")).unwrap();
//! let mut missing = ResultChannel::create(Path::new("missing.csv")).unwrap();
//!
//! let mut resolver = Resolver::new(&contigs, store, 5);
//! let summary = resolver.classify(queries, &mut exact, &mut missing).unwrap();
//! println!("{} exact, {} non-exact", summary.exact_rows, summary.non_exact_rows);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Queries, reference records, statuses, result rows, contig tables
//! - [`matching`]: Identity matching, variant location, classification
//! - [`store`]: Reference variant stores
//! - [`parsing`]: Genotype query and contig map parsers
//! - [`output`]: Lazily-headed CSV result channels
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod output;
pub mod parsing;
pub mod store;

// Re-export commonly used types for convenience
pub use crate::core::contig::ContigTable;
pub use crate::core::types::*;
pub use matching::engine::{ClassifySummary, Resolver, ResolverConfig};
pub use output::ResultChannel;
pub use store::{MemoryStore, VariantStore};
