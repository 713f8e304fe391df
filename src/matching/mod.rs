//! Resolution of genotype queries against a reference variant store.
//!
//! - [`identity`]: decides whether a reference record denotes a queried rsid
//! - [`locator`]: exact-position lookup with windowed fallback
//! - [`engine`]: per-query pipeline that classifies and routes result rows
//!
//! ## Resolution
//!
//! Each query ends in exactly one [`MatchStatus`](crate::core::types::MatchStatus):
//!
//! 1. **`no_contig`**: the chromosome label is not in the contig table
//! 2. **`missing_contig`**: the contig is not declared by the store
//! 3. **`exact`**: a record at the queried position carries the rsid
//! 4. **`window`**: a record within the configured window carries the rsid
//! 5. **`not_found`**: none of the above
//!
//! ## Example
//!
//! ```rust,no_run
//! use rsid_resolver::core::contig::ContigTable;
//! use rsid_resolver::core::types::Query;
//! use rsid_resolver::matching::engine::Resolver;
//! use rsid_resolver::store::MemoryStore;
//! use std::path::Path;
//!
//! let store = MemoryStore::from_vcf_path(Path::new("dbsnp.vcf")).unwrap();
//! let contigs = ContigTable::default();
//! let mut resolver = Resolver::new(&contigs, store, 10);
//!
//! let row = resolver.resolve(&Query::new("rs1", "chr1", 10000));
//! println!("{} -> {}", row.query_rsid, row.status);
//! ```

pub mod engine;
pub mod identity;
pub mod locator;

pub use engine::{ClassifySummary, ResolveError, Resolver, ResolverConfig};
