use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::cli::{require_exists, ContigArgs, OutputFormat};
use crate::core::types::MatchStatus;
use crate::matching::engine::{ClassifySummary, Resolver, ResolverConfig};
use crate::output::ResultChannel;
use crate::parsing::genotype::QueryReader;
use crate::store;

#[derive(Args)]
pub struct ResolveArgs {
    /// Genotype file with rsid, chromosome, position columns (plain or .gz)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Reference VCF: bgzip-compressed with a .tbi/.csi index, or plain text
    #[arg(short, long)]
    pub reference: PathBuf,

    /// Where to write exact-match rows
    #[arg(short, long)]
    pub output: PathBuf,

    /// Where to write rows without an exact match
    #[arg(long)]
    pub missing_output: PathBuf,

    /// Only process the first N queries (0 processes all)
    #[arg(long)]
    pub limit: Option<usize>,

    /// If non-zero, search ±window bp when the exact position misses
    #[arg(short, long, default_value = "0")]
    pub window: u64,

    #[command(flatten)]
    pub contigs: ContigArgs,
}

impl ResolveArgs {
    fn config(&self) -> ResolverConfig {
        ResolverConfig {
            window: self.window,
            limit: self.limit,
        }
    }
}

/// Execute resolve subcommand
///
/// # Errors
///
/// Returns an error if an input is missing, the reference cannot be opened,
/// or the outputs cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ResolveArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    require_exists(&args.input, "genotype file")?;
    require_exists(&args.reference, "reference VCF")?;

    let config = args.config();
    let contigs = args.contigs.table()?;
    let store = store::open(&args.reference)
        .with_context(|| format!("Failed to open reference {}", args.reference.display()))?;

    if verbose {
        eprintln!(
            "Resolving against {} ({} contig labels, window {})",
            args.reference.display(),
            contigs.len(),
            config.window
        );
    }

    let mut queries = QueryReader::open(&args.input, config.limit)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;

    let mut exact = ResultChannel::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let mut non_exact = ResultChannel::create(&args.missing_output)
        .with_context(|| format!("Failed to create {}", args.missing_output.display()))?;

    let mut resolver = Resolver::new(&contigs, store, config.window);
    let summary = resolver.classify(&mut queries, &mut exact, &mut non_exact)?;
    let skipped = queries.skipped();
    exact.into_inner()?.flush()?;
    non_exact.into_inner()?.flush()?;

    info!(
        queries = summary.queries,
        exact = summary.exact_rows,
        non_exact = summary.non_exact_rows,
        skipped_lines = skipped,
        "Resolution finished"
    );

    match format {
        OutputFormat::Text => print_text_summary(&args, &summary, skipped, verbose),
        OutputFormat::Json => print_json_summary(&args, &summary, skipped)?,
        OutputFormat::Tsv => print_tsv_summary(&summary, skipped),
    }

    Ok(())
}

/// JSON run report: where things were read and written, plus the counts
#[derive(Serialize)]
struct RunReport<'a> {
    input: String,
    reference: String,
    window: u64,
    exact_output: String,
    non_exact_output: String,
    skipped_lines: usize,
    #[serde(flatten)]
    summary: &'a ClassifySummary,
}

fn print_text_summary(
    args: &ResolveArgs,
    summary: &ClassifySummary,
    skipped: usize,
    verbose: bool,
) {
    println!(
        "Wrote {} exact rows to {} and {} non-exact rows to {}",
        summary.exact_rows,
        args.output.display(),
        summary.non_exact_rows,
        args.missing_output.display()
    );

    if verbose {
        for status in MatchStatus::ALL {
            eprintln!("  {:<15} {}", status.as_str(), summary.count(status));
        }
        eprintln!("  {:<15} {}", "skipped_lines", skipped);
    }
}

fn print_json_summary(
    args: &ResolveArgs,
    summary: &ClassifySummary,
    skipped: usize,
) -> anyhow::Result<()> {
    let report = RunReport {
        input: args.input.display().to_string(),
        reference: args.reference.display().to_string(),
        window: args.window,
        exact_output: args.output.display().to_string(),
        non_exact_output: args.missing_output.display().to_string(),
        skipped_lines: skipped,
        summary,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_tsv_summary(summary: &ClassifySummary, skipped: usize) {
    println!("status\tcount");
    for status in MatchStatus::ALL {
        println!("{}\t{}", status, summary.count(status));
    }
    println!("skipped_lines\t{skipped}");
}
