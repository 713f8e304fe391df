//! Conversion from noodles VCF records to [`ReferenceCandidate`]s.

use noodles::vcf;
use noodles::vcf::variant::record_buf::info::field::value::Array;
use noodles::vcf::variant::record_buf::info::field::Value;
use noodles::vcf::variant::RecordBuf;

use crate::core::types::ReferenceCandidate;

/// INFO key holding dbSNP's numeric rsid cross-reference
pub const RS_INFO_KEY: &str = "RS";

/// INFO key holding the end position of symbolic alleles
pub const END_INFO_KEY: &str = "END";

/// Build a candidate from a parsed VCF record.
///
/// Returns `None` for records without a start position.
pub fn candidate_from_record(record: &RecordBuf) -> Option<ReferenceCandidate> {
    let pos = record.variant_start()?.get() as u64;

    let ids = record.ids().as_ref();
    let id_field = if ids.is_empty() {
        None
    } else {
        Some(ids.iter().map(String::as_str).collect::<Vec<_>>().join(";"))
    };

    let rs_numeric_ids = match record.info().get(RS_INFO_KEY) {
        Some(Some(value)) => rs_values(value),
        _ => Vec::new(),
    };

    let info_end = match record.info().get(END_INFO_KEY) {
        Some(Some(Value::Integer(n))) => u64::try_from(*n).ok(),
        _ => None,
    };

    Some(ReferenceCandidate {
        contig: record.reference_sequence_name().to_string(),
        pos,
        ref_allele: record.reference_bases().to_string(),
        alt_alleles: record.alternate_bases().as_ref().to_vec(),
        filter_tags: record.filters().as_ref().iter().cloned().collect(),
        id_field,
        rs_numeric_ids,
        info_end,
    })
}

/// Numeric rsids from an `RS` INFO value, whether declared as a single
/// integer, an integer list, or left untyped as text
fn rs_values(value: &Value) -> Vec<i64> {
    match value {
        Value::Integer(n) => vec![i64::from(*n)],
        Value::String(s) => parse_rs_text(s),
        Value::Array(Array::Integer(values)) => {
            values.iter().flatten().map(|n| i64::from(*n)).collect()
        }
        Value::Array(Array::String(values)) => values
            .iter()
            .flatten()
            .flat_map(|s| parse_rs_text(s))
            .collect(),
        _ => Vec::new(),
    }
}

fn parse_rs_text(text: &str) -> Vec<i64> {
    text.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

/// Contig names declared in a VCF header
pub fn header_contigs(header: &vcf::Header) -> impl Iterator<Item = &str> {
    header.contigs().keys().map(String::as_str)
}
