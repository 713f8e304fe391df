use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::core::contig::ContigTable;
use crate::core::types::{MatchStatus, Query, ResultRow};
use crate::matching::locator::VariantLocator;
use crate::output::{OutputError, ResultChannel};
use crate::parsing::ParseError;
use crate::store::VariantStore;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Failed to read queries: {0}")]
    Input(#[from] ParseError),

    #[error("Failed to write results: {0}")]
    Output(#[from] OutputError),
}

impl From<std::convert::Infallible> for ResolveError {
    fn from(e: std::convert::Infallible) -> Self {
        match e {}
    }
}

/// Configuration for a resolution run
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    /// Margin in bases for the fallback search; 0 disables it
    pub window: u64,
    /// Maximum number of queries to read; `None` reads all
    pub limit: Option<usize>,
}

/// Counts produced by a classification run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifySummary {
    pub queries: usize,
    pub exact_rows: usize,
    pub non_exact_rows: usize,
    /// One entry per status, zero when no query ended with it
    pub by_status: BTreeMap<MatchStatus, usize>,
}

impl Default for ClassifySummary {
    fn default() -> Self {
        Self {
            queries: 0,
            exact_rows: 0,
            non_exact_rows: 0,
            by_status: MatchStatus::ALL.iter().map(|s| (*s, 0)).collect(),
        }
    }
}

impl ClassifySummary {
    fn record(&mut self, status: MatchStatus) {
        self.queries += 1;
        if status == MatchStatus::Exact {
            self.exact_rows += 1;
        } else {
            self.non_exact_rows += 1;
        }
        *self.by_status.entry(status).or_insert(0) += 1;
    }

    /// Number of queries that ended with `status`
    #[must_use]
    pub fn count(&self, status: MatchStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// Resolves queries against a reference store and partitions the rows
pub struct Resolver<'a, S> {
    contigs: &'a ContigTable,
    locator: VariantLocator<S>,
}

impl<'a, S: VariantStore> Resolver<'a, S> {
    pub fn new(contigs: &'a ContigTable, store: S, window: u64) -> Self {
        Self {
            contigs,
            locator: VariantLocator::new(store, window),
        }
    }

    /// Normalize, locate and build the row for one query
    pub fn resolve(&mut self, query: &Query) -> ResultRow {
        let contig = self.contigs.canonical(&query.chrom);
        let resolution = self.locator.locate(contig, query);
        debug!(
            rsid = %query.rsid,
            chrom = %query.chrom,
            pos = query.pos,
            contig = contig.unwrap_or(""),
            status = %resolution.status(),
            "Resolved query"
        );
        ResultRow::new(query, &resolution)
    }

    /// Resolve every query in input order, sending `exact` rows to `exact`
    /// and every other row to `non_exact`
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Input` if the query source fails and
    /// `ResolveError::Output` if a row cannot be written. Rows already
    /// written stay written.
    pub fn classify<I, E, X, N>(
        &mut self,
        queries: I,
        exact: &mut ResultChannel<X>,
        non_exact: &mut ResultChannel<N>,
    ) -> Result<ClassifySummary, ResolveError>
    where
        I: IntoIterator<Item = Result<Query, E>>,
        E: Into<ResolveError>,
        X: Write,
        N: Write,
    {
        let mut summary = ClassifySummary::default();

        for query in queries {
            let query = query.map_err(Into::<ResolveError>::into)?;
            let row = self.resolve(&query);
            summary.record(row.status);

            if row.status == MatchStatus::Exact {
                exact.write(&row)?;
            } else {
                non_exact.write(&row)?;
            }
        }

        exact.flush()?;
        non_exact.flush()?;
        Ok(summary)
    }
}
