use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{require_exists, ContigArgs, OutputFormat};
use crate::core::types::{Query, ResultRow};
use crate::matching::engine::Resolver;
use crate::store;

#[derive(Args)]
pub struct LookupArgs {
    /// rsid to confirm (e.g. rs12345)
    pub rsid: String,

    /// Chromosome label (e.g. 7, chr7, MT)
    pub chrom: String,

    /// 1-based position
    pub pos: u64,

    /// Reference VCF: bgzip-compressed with a .tbi/.csi index, or plain text
    #[arg(short, long)]
    pub reference: PathBuf,

    /// If non-zero, search ±window bp when the exact position misses
    #[arg(short, long, default_value = "0")]
    pub window: u64,

    #[command(flatten)]
    pub contigs: ContigArgs,
}

/// Execute lookup subcommand
///
/// # Errors
///
/// Returns an error if the reference cannot be opened.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: LookupArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    require_exists(&args.reference, "reference VCF")?;

    let contigs = args.contigs.table()?;
    let store = store::open(&args.reference)
        .with_context(|| format!("Failed to open reference {}", args.reference.display()))?;

    let query = Query::new(&args.rsid, &args.chrom, args.pos);
    if verbose {
        eprintln!(
            "{} normalizes to {}",
            args.chrom,
            contigs.canonical(&args.chrom).unwrap_or("<unknown>")
        );
    }

    let mut resolver = Resolver::new(&contigs, store, args.window);
    let row = resolver.resolve(&query);

    match format {
        OutputFormat::Text => print_text_row(&row),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&row)?),
        OutputFormat::Tsv => print_tsv_row(&row)?,
    }

    Ok(())
}

fn print_text_row(row: &ResultRow) {
    println!(
        "{} {}:{} -> {}",
        row.query_rsid, row.query_chrom, row.query_pos, row.status
    );
    if let Some(pos) = row.ref_pos {
        println!("  Contig:  {}:{}", row.ref_contig, pos);
        println!("  Alleles: {} > {}", row.reference, row.alt);
        println!("  Filters: {}", row.filters);
    }
}

fn print_tsv_row(row: &ResultRow) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(std::io::stdout());
    writer.serialize(row)?;
    writer.flush()?;
    Ok(())
}
