//! Core data types for rsid resolution.
//!
//! - [`Query`]: a genotype row to resolve (rsid, raw chromosome label, position)
//! - [`ReferenceCandidate`]: a variant record returned by the reference store
//! - [`Resolution`], [`MatchStatus`]: the outcome of resolving one query
//! - [`ResultRow`]: the tabular row written for every query
//! - [`ContigTable`]: label to accession mapping used to normalize chromosomes
//!
//! ## Contig Naming
//!
//! Genotype files label chromosomes loosely while the reference VCF is keyed by
//! assembly accessions:
//!
//! | Query label        | `GRCh38` contig  |
//! |--------------------|----------------|
//! | `1`, `chr1`, `CHR1`| `NC_000001.11` |
//! | `X`, `chrX`        | `NC_000023.11` |
//! | `M`, `MT`, `chrM`  | `NC_012920.1`  |
//!
//! [`Query`]: types::Query
//! [`ReferenceCandidate`]: types::ReferenceCandidate
//! [`Resolution`]: types::Resolution
//! [`MatchStatus`]: types::MatchStatus
//! [`ResultRow`]: types::ResultRow
//! [`ContigTable`]: contig::ContigTable

pub mod assembly;
pub mod contig;
pub mod types;
