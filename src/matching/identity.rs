//! Identity confirmation between a reference record and a queried rsid.
//!
//! dbSNP-style VCFs may carry an rsid in the ID column, only as a numeric
//! `RS` INFO value, or both. Either form confirms the identity.

use std::collections::HashSet;

use crate::core::types::ReferenceCandidate;

/// All rsid spellings a candidate answers to.
///
/// The ID column is split on `;` and each token trimmed; `.` (missing) and
/// empty tokens are dropped. Every numeric `RS` value contributes `rs<n>`.
#[must_use]
pub fn candidate_identities(candidate: &ReferenceCandidate) -> HashSet<String> {
    let mut ids: HashSet<String> = candidate
        .id_field
        .as_deref()
        .map(|field| {
            field
                .split(';')
                .map(str::trim)
                .filter(|token| !token.is_empty() && *token != ".")
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    ids.extend(candidate.rs_numeric_ids.iter().map(|n| format!("rs{n}")));
    ids
}

/// Whether `candidate` denotes `rsid`
#[must_use]
pub fn record_matches(candidate: &ReferenceCandidate, rsid: &str) -> bool {
    candidate_identities(candidate).contains(rsid)
}
