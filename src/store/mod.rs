//! Reference variant stores.
//!
//! A store answers two questions for the locator: which contigs it knows, and
//! which records overlap a 0-based half-open range on one of them.
//!
//! - [`indexed::IndexedVcfStore`]: bgzip-compressed, tabix-indexed VCF queried
//!   on demand
//! - [`memory::MemoryStore`]: records held in memory, loaded from a plain VCF or
//!   built directly

use std::path::Path;

use thiserror::Error;

use crate::core::types::ReferenceCandidate;

pub mod indexed;
pub mod memory;
pub mod record;

pub use indexed::IndexedVcfStore;
pub use memory::MemoryStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Invalid range {start}..{end} on {contig}")]
    InvalidRange { contig: String, start: u64, end: u64 },

    #[error("Unknown contig: {0}")]
    UnknownContig(String),
}

/// A range-queryable set of reference variant records
pub trait VariantStore {
    /// Whether the store knows `contig`, from its header, index or records
    fn contains_contig(&self, contig: &str) -> bool;

    /// Records overlapping the 0-based half-open range `[start, end)` on
    /// `contig`, in store order
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the range is rejected or the records cannot be
    /// read.
    fn fetch(
        &mut self,
        contig: &str,
        start: u64,
        end: u64,
    ) -> Result<Vec<ReferenceCandidate>, StoreError>;
}

impl<S: VariantStore + ?Sized> VariantStore for Box<S> {
    fn contains_contig(&self, contig: &str) -> bool {
        (**self).contains_contig(contig)
    }

    fn fetch(
        &mut self,
        contig: &str,
        start: u64,
        end: u64,
    ) -> Result<Vec<ReferenceCandidate>, StoreError> {
        (**self).fetch(contig, start, end)
    }
}

/// Open a reference store, picking the backend from the file name.
///
/// `.gz`/`.bgz` files are opened through their tabix index; anything else is
/// read fully into memory.
///
/// # Errors
///
/// Returns `StoreError` if the file, its index, or its header cannot be read.
pub fn open(path: &Path) -> Result<Box<dyn VariantStore>, StoreError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("gz" | "bgz") => Ok(Box::new(IndexedVcfStore::open(path)?)),
        _ => Ok(Box::new(MemoryStore::from_vcf_path(path)?)),
    }
}
