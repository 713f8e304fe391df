use serde::{Deserialize, Serialize};

/// Reference assembly whose contig accessions a query label is mapped onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Assembly {
    Grch37,
    #[default]
    Grch38,
}

impl std::fmt::Display for Assembly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grch37 => write!(f, "GRCh37"),
            Self::Grch38 => write!(f, "GRCh38"),
        }
    }
}

/// A single genotype query: rsid, raw chromosome label, 1-based position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub rsid: String,
    pub chrom: String,
    pub pos: u64,
}

impl Query {
    pub fn new(rsid: impl Into<String>, chrom: impl Into<String>, pos: u64) -> Self {
        Self {
            rsid: rsid.into(),
            chrom: chrom.into(),
            pos,
        }
    }
}

/// A record returned by the reference store for a contig range
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferenceCandidate {
    /// Contig name as recorded in the store
    pub contig: String,

    /// 1-based variant start
    pub pos: u64,

    pub ref_allele: String,

    pub alt_alleles: Vec<String>,

    /// FILTER column values in record order. Empty when nothing was recorded.
    pub filter_tags: Vec<String>,

    /// Raw ID column, possibly several `;`-delimited identifiers
    pub id_field: Option<String>,

    /// Numeric `RS` INFO cross-references (rsid without the `rs` prefix)
    pub rs_numeric_ids: Vec<i64>,

    /// 1-based inclusive end from `INFO/END`, for symbolic alleles
    pub info_end: Option<u64>,
}

impl ReferenceCandidate {
    pub fn new(contig: impl Into<String>, pos: u64, ref_allele: impl Into<String>) -> Self {
        Self {
            contig: contig.into(),
            pos,
            ref_allele: ref_allele.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_alts<I, S>(mut self, alts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alt_alleles = alts.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id_field = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_rs(mut self, rs: impl IntoIterator<Item = i64>) -> Self {
        self.rs_numeric_ids = rs.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_filters<I, S>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_tags = filters.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_end(mut self, end: u64) -> Self {
        self.info_end = Some(end);
        self
    }

    /// 1-based inclusive end on the reference: `INFO/END` when recorded,
    /// otherwise the last base of the reference allele
    #[must_use]
    pub fn end(&self) -> u64 {
        let ref_end = self.pos + (self.ref_allele.len() as u64).max(1) - 1;
        self.info_end.unwrap_or(ref_end).max(self.pos)
    }

    /// Filter summary for output: `;`-joined tags, or `PASS` when none are recorded
    #[must_use]
    pub fn filter_summary(&self) -> String {
        if self.filter_tags.is_empty() {
            "PASS".to_string()
        } else {
            self.filter_tags.join(";")
        }
    }
}

/// Resolution status assigned to every query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Identity confirmed at the queried position
    Exact,
    /// Identity confirmed within the fallback window
    Window,
    /// Contig known, no matching record found
    NotFound,
    /// Contig label recognized but absent from the store
    MissingContig,
    /// Contig label not recognized
    NoContig,
}

impl MatchStatus {
    pub const ALL: [MatchStatus; 5] = [
        Self::Exact,
        Self::Window,
        Self::NotFound,
        Self::MissingContig,
        Self::NoContig,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Window => "window",
            Self::NotFound => "not_found",
            Self::MissingContig => "missing_contig",
            Self::NoContig => "no_contig",
        }
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Exact | Self::Window)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of locating a query in the store.
///
/// Matched variants own the record that confirmed the identity, so a status
/// and its reference fields can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Exact(ReferenceCandidate),
    Window(ReferenceCandidate),
    NotFound,
    MissingContig,
    NoContig,
}

impl Resolution {
    #[must_use]
    pub fn status(&self) -> MatchStatus {
        match self {
            Self::Exact(_) => MatchStatus::Exact,
            Self::Window(_) => MatchStatus::Window,
            Self::NotFound => MatchStatus::NotFound,
            Self::MissingContig => MatchStatus::MissingContig,
            Self::NoContig => MatchStatus::NoContig,
        }
    }

    #[must_use]
    pub fn candidate(&self) -> Option<&ReferenceCandidate> {
        match self {
            Self::Exact(c) | Self::Window(c) => Some(c),
            _ => None,
        }
    }
}

/// One output row. Field order defines the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub query_rsid: String,
    pub query_chrom: String,
    pub query_pos: u64,
    pub ref_contig: String,
    pub ref_pos: Option<u64>,
    #[serde(rename = "ref")]
    pub reference: String,
    pub alt: String,
    pub filters: String,
    pub status: MatchStatus,
}

impl ResultRow {
    /// Build the row for a query and its resolution
    #[must_use]
    pub fn new(query: &Query, resolution: &Resolution) -> Self {
        let mut row = Self {
            query_rsid: query.rsid.clone(),
            query_chrom: query.chrom.clone(),
            query_pos: query.pos,
            ref_contig: String::new(),
            ref_pos: None,
            reference: String::new(),
            alt: String::new(),
            filters: String::new(),
            status: resolution.status(),
        };

        if let Some(candidate) = resolution.candidate() {
            row.ref_contig.clone_from(&candidate.contig);
            row.ref_pos = Some(candidate.pos);
            row.reference.clone_from(&candidate.ref_allele);
            row.alt = candidate.alt_alleles.join(",");
            row.filters = candidate.filter_summary();
        }

        row
    }

    /// Column names in output order
    pub const HEADER: [&'static str; 9] = [
        "query_rsid",
        "query_chrom",
        "query_pos",
        "ref_contig",
        "ref_pos",
        "ref",
        "alt",
        "filters",
        "status",
    ];
}
