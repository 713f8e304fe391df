use std::path::Path;

use crate::core::contig::ContigTable;
use crate::parsing::ParseError;

/// Maximum number of entries accepted in a contig map file
pub const MAX_CONTIG_ENTRIES: usize = 100_000;

/// Parse a contig map file with columns: label, accession
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_contig_map_file(path: &Path, delimiter: char) -> Result<ContigTable, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_contig_map_text(&content, delimiter)
}

/// Parse contig map text with columns: label, accession
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if lines have fewer than 2 fields, a
/// field is empty, or no entries are found, or `ParseError::TooManyContigs`
/// if the limit is exceeded.
pub fn parse_contig_map_text(text: &str, delimiter: char) -> Result<ContigTable, ParseError> {
    let mut entries: Vec<(String, String)> = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).collect();

        // Check if first non-empty/non-comment line is a header
        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
            if matches!(first.trim(), "label" | "chrom" | "chromosome" | "name") {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() < 2 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 2 fields"
            )));
        }

        let label = fields[0].trim();
        let accession = fields[1].trim();
        if label.is_empty() || accession.is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has an empty label or accession"
            )));
        }

        if entries.len() >= MAX_CONTIG_ENTRIES {
            return Err(ParseError::TooManyContigs(entries.len()));
        }

        entries.push((label.to_string(), accession.to_string()));
    }

    if entries.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No contig mappings found in file".to_string(),
        ));
    }

    Ok(ContigTable::new(entries))
}
