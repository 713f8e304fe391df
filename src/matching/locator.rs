//! Exact-then-windowed lookup of a query in a [`VariantStore`].
//!
//! Query positions are 1-based; store ranges are 0-based half-open. The exact
//! phase asks for `[pos - 1, pos)`. On a miss, and only with a non-zero window,
//! the window phase asks for `[pos - 1 - window, pos + window)` with the lower
//! bound clamped at zero. In both phases the first record, in store order,
//! whose identity matches the rsid wins.

use tracing::debug;

use crate::core::types::{Query, ReferenceCandidate, Resolution};
use crate::matching::identity::record_matches;
use crate::store::VariantStore;

pub struct VariantLocator<S> {
    store: S,
    window: u64,
}

impl<S: VariantStore> VariantLocator<S> {
    pub fn new(store: S, window: u64) -> Self {
        Self { store, window }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Resolve `query` on its canonical contig (`None` if the label was not
    /// recognized)
    pub fn locate(&mut self, contig: Option<&str>, query: &Query) -> Resolution {
        let Some(contig) = contig else {
            return Resolution::NoContig;
        };
        if !self.store.contains_contig(contig) {
            return Resolution::MissingContig;
        }

        let exact_start = query.pos.saturating_sub(1);
        if let Some(hit) = self.search(contig, exact_start, query.pos, &query.rsid) {
            return Resolution::Exact(hit);
        }

        if self.window > 0 {
            let start = query.pos.saturating_sub(1).saturating_sub(self.window);
            let end = query.pos.saturating_add(self.window);
            if let Some(hit) = self.search(contig, start, end, &query.rsid) {
                return Resolution::Window(hit);
            }
        }

        Resolution::NotFound
    }

    /// First candidate in `[start, end)` denoting `rsid`. A rejected range
    /// counts as no candidates.
    fn search(
        &mut self,
        contig: &str,
        start: u64,
        end: u64,
        rsid: &str,
    ) -> Option<ReferenceCandidate> {
        match self.store.fetch(contig, start, end) {
            Ok(candidates) => candidates.into_iter().find(|c| record_matches(c, rsid)),
            Err(e) => {
                debug!(contig, start, end, error = %e, "Store rejected range query");
                None
            }
        }
    }
}
