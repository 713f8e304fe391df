use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use noodles::core::{Position, Region};
use noodles::csi::BinningIndex;
use noodles::vcf;
use noodles::vcf::variant::RecordBuf;
use tracing::{debug, info};

use crate::core::types::ReferenceCandidate;
use crate::store::record::{candidate_from_record, header_contigs};
use crate::store::{StoreError, VariantStore};

/// A bgzip-compressed VCF with a tabix (`.tbi`) or CSI index, queried by
/// region on demand
pub struct IndexedVcfStore {
    reader: vcf::io::IndexedReader<noodles::bgzf::Reader<File>>,
    header: vcf::Header,
    contigs: HashSet<String>,
    /// Largest 1-based position the index can address
    max_position: u64,
}

impl IndexedVcfStore {
    /// Open the VCF and its index
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Noodles` if the file or its index cannot be
    /// opened, or if the header cannot be parsed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let mut reader = vcf::io::indexed_reader::Builder::default()
            .build_from_path(path)
            .map_err(|e| {
                StoreError::Noodles(format!(
                    "Error while opening {} (or associated index): {e}",
                    path.display()
                ))
            })?;

        let header = reader
            .read_header()
            .map_err(|e| StoreError::Noodles(e.to_string()))?;

        let index = reader.index();
        let mut contigs: HashSet<String> = header_contigs(&header).map(str::to_string).collect();
        if let Some(index_header) = index.header() {
            contigs.extend(
                index_header
                    .reference_sequence_names()
                    .iter()
                    .map(ToString::to_string),
            );
        }
        let max_position = index_max_position(index.min_shift(), index.depth());

        info!(
            path = %path.display(),
            contigs = contigs.len(),
            max_position,
            "Opened indexed reference VCF"
        );

        Ok(Self {
            reader,
            header,
            contigs,
            max_position,
        })
    }
}

/// Largest position a binning index with this geometry can address
/// (`2^29 - 1` for tabix)
fn index_max_position(min_shift: u8, depth: u8) -> u64 {
    let bits = u32::from(min_shift) + 3 * u32::from(depth);
    1u64.checked_shl(bits).map_or(u64::MAX, |n| n - 1)
}

/// Convert a 0-based half-open range to a 1-based closed region, clamping
/// its end to `max_position`.
///
/// Returns `None` when the clamped range is empty.
fn to_region(
    contig: &str,
    start: u64,
    end: u64,
    max_position: u64,
) -> Result<Option<Region>, StoreError> {
    if start > end {
        return Err(StoreError::InvalidRange {
            contig: contig.to_string(),
            start,
            end,
        });
    }
    let end = end.min(max_position);
    if start >= end {
        return Ok(None);
    }

    let invalid = || StoreError::InvalidRange {
        contig: contig.to_string(),
        start,
        end,
    };
    let first = usize::try_from(start + 1)
        .ok()
        .and_then(|n| Position::try_from(n).ok())
        .ok_or_else(invalid)?;
    let last = usize::try_from(end)
        .ok()
        .and_then(|n| Position::try_from(n).ok())
        .ok_or_else(invalid)?;

    Ok(Some(Region::new(contig, first..=last)))
}

impl VariantStore for IndexedVcfStore {
    fn contains_contig(&self, contig: &str) -> bool {
        self.contigs.contains(contig)
    }

    fn fetch(
        &mut self,
        contig: &str,
        start: u64,
        end: u64,
    ) -> Result<Vec<ReferenceCandidate>, StoreError> {
        let Some(region) = to_region(contig, start, end, self.max_position)? else {
            return Ok(Vec::new());
        };

        let query = self
            .reader
            .query(&self.header, &region)
            .map_err(|e| StoreError::Noodles(format!("{region}: {e}")))?;

        let mut candidates = Vec::new();
        for result in query {
            let record = result?;
            let record = RecordBuf::try_from_variant_record(&self.header, &record)?;
            if let Some(candidate) = candidate_from_record(&record) {
                candidates.push(candidate);
            }
        }

        debug!(%region, records = candidates.len(), "Fetched reference records");
        Ok(candidates)
    }
}
