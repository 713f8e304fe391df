use std::collections::HashMap;

use crate::core::types::Assembly;

/// Clean a raw chromosome label: trim, upper-case, drop a leading `CHR`.
///
/// `"chr7"`, `" CHR7 "` and `"7"` all become `"7"`.
#[must_use]
pub fn normalize_label(raw: &str) -> String {
    let clean = raw.trim().to_uppercase();
    match clean.strip_prefix("CHR") {
        Some(rest) => rest.to_string(),
        None => clean,
    }
}

/// Mapping from cleaned chromosome labels to the contig accessions used by the
/// reference store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContigTable {
    by_label: HashMap<String, String>,
}

impl ContigTable {
    /// Build a table from `(label, accession)` pairs.
    ///
    /// Labels go through [`normalize_label`] so `chrX` and `X` collapse to
    /// the same entry; a later pair replaces an earlier one.
    pub fn new<I, L, A>(entries: I) -> Self
    where
        I: IntoIterator<Item = (L, A)>,
        L: AsRef<str>,
        A: Into<String>,
    {
        let by_label = entries
            .into_iter()
            .map(|(label, accession)| (normalize_label(label.as_ref()), accession.into()))
            .collect();
        Self { by_label }
    }

    #[must_use]
    pub fn for_assembly(assembly: Assembly) -> Self {
        Self::new(assembly.accessions().iter().copied())
    }

    /// Canonical contig for a raw label, or `None` if the label is unknown
    #[must_use]
    pub fn canonical(&self, raw: &str) -> Option<&str> {
        self.by_label.get(&normalize_label(raw)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }

    /// Entries sorted by accession, then label
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .by_label
            .iter()
            .map(|(l, a)| (l.as_str(), a.as_str()))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

impl Default for ContigTable {
    fn default() -> Self {
        Self::for_assembly(Assembly::default())
    }
}
