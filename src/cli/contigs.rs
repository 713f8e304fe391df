use clap::Args;

use crate::cli::{ContigArgs, OutputFormat};

#[derive(Args)]
pub struct ContigsArgs {
    #[command(flatten)]
    pub contigs: ContigArgs,
}

/// Execute contigs subcommand
///
/// # Errors
///
/// Returns an error if the contig map file cannot be parsed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ContigsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let table = args.contigs.table()?;

    match format {
        OutputFormat::Text => {
            let source = match &args.contigs.contig_map {
                Some(path) => path.display().to_string(),
                None => args.contigs.assembly.to_string(),
            };
            println!("Contig table: {source} ({} labels)", table.len());
            for (label, accession) in table.entries() {
                println!("  {label:<4} -> {accession}");
            }
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = table
                .entries()
                .into_iter()
                .map(|(label, accession)| {
                    serde_json::json!({ "label": label, "accession": accession })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Tsv => {
            println!("label\taccession");
            for (label, accession) in table.entries() {
                println!("{label}\t{accession}");
            }
        }
    }

    Ok(())
}
