//! Command-line interface for rsid-resolver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **resolve**: Resolve every query in a genotype file and split the results
//!   into exact and non-exact CSV files
//! - **lookup**: Resolve a single rsid/chromosome/position query
//! - **contigs**: Show the chromosome label to contig accession table
//!
//! ## Usage
//!
//! ```text
//! # Resolve a genotype file against an indexed dbSNP VCF
//! rsid-resolver resolve --input genome.txt --reference GCF_000001405.40.gz \
//!     --output out/exact.csv --missing-output out/missing.csv
//!
//! # Tolerate coordinate drift of up to 5 bp, JSON summary
//! rsid-resolver resolve --input genome.txt --reference dbsnp.vcf.gz \
//!     --output exact.csv --missing-output missing.csv --window 5 --format json
//!
//! # Check one variant
//! rsid-resolver lookup rs1 chr1 10000 --reference dbsnp.vcf.gz
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::core::contig::ContigTable;
use crate::core::types::Assembly;
use crate::parsing;

pub mod contigs;
pub mod lookup;
pub mod resolve;

#[derive(Parser)]
#[command(name = "rsid-resolver")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Resolve genotype rsids against a reference variant VCF")]
#[command(
    long_about = "rsid-resolver checks genotype records (rsid, chromosome, position) against a position-indexed reference VCF such as dbSNP.\n\nEach record is classified as:\n- exact: the rsid is found at the given position\n- window: the rsid is found within --window bases\n- not_found, missing_contig, no_contig: unresolved"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve every query in a genotype file
    Resolve(resolve::ResolveArgs),

    /// Resolve a single query
    Lookup(lookup::LookupArgs),

    /// Show the chromosome label to contig table
    Contigs(contigs::ContigsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Options selecting the chromosome label to contig table
#[derive(clap::Args, Clone, Debug)]
pub struct ContigArgs {
    /// Assembly whose `RefSeq` accessions name the reference contigs
    #[arg(long, value_enum, default_value = "grch38")]
    pub assembly: Assembly,

    /// TSV/CSV file of label,accession pairs replacing the built-in table
    #[arg(long)]
    pub contig_map: Option<PathBuf>,
}

impl ContigArgs {
    /// Build the contig table these options describe
    ///
    /// # Errors
    ///
    /// Returns an error if the contig map file cannot be parsed.
    pub fn table(&self) -> anyhow::Result<ContigTable> {
        match &self.contig_map {
            Some(path) => load_contig_map(path),
            None => Ok(ContigTable::for_assembly(self.assembly)),
        }
    }
}

fn load_contig_map(path: &Path) -> anyhow::Result<ContigTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    let delimiter = if ext.as_deref() == Some("csv") { ',' } else { '\t' };

    parsing::tsv::parse_contig_map_file(path, delimiter)
        .with_context(|| format!("Failed to read contig map {}", path.display()))
}

/// Fail unless `path` exists
pub(crate) fn require_exists(path: &Path, what: &str) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("Missing {what}: {}", path.display());
    }
    Ok(())
}
