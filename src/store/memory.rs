use std::collections::{BTreeMap, HashSet};
use std::io::BufRead;
use std::path::Path;

use noodles::vcf;
use tracing::{debug, info, warn};

use crate::core::types::ReferenceCandidate;
use crate::store::record::{candidate_from_record, header_contigs};
use crate::store::{StoreError, VariantStore};

#[derive(Debug, Default)]
struct ContigRecords {
    /// Sorted by start; records sharing a start keep insertion order
    records: Vec<ReferenceCandidate>,
    /// Longest record extent seen, bounds how far back an overlap can start
    max_span: u64,
}

/// Reference records held in memory, grouped by contig and sorted by position
#[derive(Debug, Default)]
pub struct MemoryStore {
    contigs: HashSet<String>,
    by_contig: BTreeMap<String, ContigRecords>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a contig without records
    #[must_use]
    pub fn with_contig(mut self, contig: impl Into<String>) -> Self {
        self.contigs.insert(contig.into());
        self
    }

    /// Add a record, declaring its contig if needed
    pub fn insert(&mut self, candidate: ReferenceCandidate) {
        self.contigs.insert(candidate.contig.clone());
        let entry = self.by_contig.entry(candidate.contig.clone()).or_default();
        entry.max_span = entry.max_span.max(span(&candidate));

        let at = entry.records.partition_point(|c| c.pos <= candidate.pos);
        entry.records.insert(at, candidate);
    }

    #[must_use]
    pub fn with_record(mut self, candidate: ReferenceCandidate) -> Self {
        self.insert(candidate);
        self
    }

    /// Load every record of an uncompressed VCF
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be opened, or
    /// `StoreError::Noodles` if the header or a record is malformed.
    pub fn from_vcf_path(path: &Path) -> Result<Self, StoreError> {
        let file = std::fs::File::open(path)?;
        let store = Self::from_vcf_reader(std::io::BufReader::new(file))?;
        if store.is_empty() {
            warn!(path = %path.display(), "Reference VCF has no records");
        }
        info!(
            path = %path.display(),
            contigs = store.contigs.len(),
            records = store.len(),
            "Loaded reference VCF into memory"
        );
        Ok(store)
    }

    /// Load every record from VCF text
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Noodles` if the header or a record is malformed.
    pub fn from_vcf_reader<R: BufRead>(inner: R) -> Result<Self, StoreError> {
        let mut reader = vcf::io::Reader::new(inner);
        let header = reader
            .read_header()
            .map_err(|e| StoreError::Noodles(e.to_string()))?;

        let mut store = header_contigs(&header)
            .fold(Self::new(), |store, name| store.with_contig(name));

        for result in reader.record_bufs(&header) {
            let record = result.map_err(|e| StoreError::Noodles(e.to_string()))?;
            match candidate_from_record(&record) {
                Some(candidate) => store.insert(candidate),
                None => debug!(
                    contig = %record.reference_sequence_name(),
                    "Skipping reference record without a position"
                ),
            }
        }

        Ok(store)
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.by_contig.values().map(|c| c.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Number of reference bases a record covers, honoring `INFO/END`
fn span(candidate: &ReferenceCandidate) -> u64 {
    candidate.end() - candidate.pos + 1
}

impl VariantStore for MemoryStore {
    fn contains_contig(&self, contig: &str) -> bool {
        self.contigs.contains(contig)
    }

    fn fetch(
        &mut self,
        contig: &str,
        start: u64,
        end: u64,
    ) -> Result<Vec<ReferenceCandidate>, StoreError> {
        if start > end {
            return Err(StoreError::InvalidRange {
                contig: contig.to_string(),
                start,
                end,
            });
        }
        if !self.contigs.contains(contig) {
            return Err(StoreError::UnknownContig(contig.to_string()));
        }

        let Some(entry) = self.by_contig.get(contig) else {
            return Ok(Vec::new());
        };

        // 0-based start of a record is pos - 1
        let earliest = start.saturating_sub(entry.max_span);
        let from = entry.records.partition_point(|c| c.pos.saturating_sub(1) < earliest);
        let to = entry.records.partition_point(|c| c.pos.saturating_sub(1) < end);

        Ok(entry.records[from..to]
            .iter()
            .filter(|c| c.pos.saturating_sub(1) + span(c) > start)
            .cloned()
            .collect())
    }
}
