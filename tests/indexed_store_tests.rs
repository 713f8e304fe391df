//! Resolution against bgzip-compressed, tabix-indexed reference VCFs

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use noodles::{bgzf, tabix, vcf};
use tempfile::TempDir;

use rsid_resolver::store::{self, IndexedVcfStore};
use rsid_resolver::{ContigTable, MatchStatus, MemoryStore, Query, Resolver, VariantStore};

const REFERENCE_VCF: &str = "##fileformat=VCFv4.2
##contig=<ID=NC_000001.11,length=248956422>
##contig=<ID=NC_000007.14,length=159345973>
##INFO=<ID=RS,Number=1,Type=Integer,Description=\"dbSNP ID\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
NC_000001.11\t1\trs0\tN\tA\t.\t.\t.
NC_000001.11\t10000\trs1\tA\tG\t.\t.\tRS=1
NC_000001.11\t10050\t.\tC\tT,G\t.\t.\tRS=2
";

/// Same records, no `##contig` lines
const HEADERLESS_VCF: &str = "##fileformat=VCFv4.2
##INFO=<ID=RS,Number=1,Type=Integer,Description=\"dbSNP ID\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
NC_000001.11\t10000\trs1\tA\tG\t.\t.\tRS=1
";

/// Write `text` as `<name>.vcf.gz` with a `.tbi` alongside
fn write_indexed(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(format!("{name}.vcf.gz"));
    let mut writer = bgzf::Writer::new(File::create(&path).expect("Failed to create VCF"));
    writer.write_all(text.as_bytes()).expect("Failed to write VCF");
    writer.finish().expect("Failed to finish BGZF stream");

    let index = vcf::index(&path).expect("Failed to index VCF");
    tabix::write(dir.join(format!("{name}.vcf.gz.tbi")), &index).expect("Failed to write index");
    path
}

fn reference(dir: &Path) -> IndexedVcfStore {
    let path = write_indexed(dir, "reference", REFERENCE_VCF);
    IndexedVcfStore::open(&path).expect("Failed to open indexed VCF")
}

fn status(store: IndexedVcfStore, query: &Query, window: u64) -> MatchStatus {
    let contigs = ContigTable::default();
    Resolver::new(&contigs, store, window).resolve(query).status
}

#[test]
fn test_indexed_statuses() {
    let dir = TempDir::new().unwrap();
    let contigs = ContigTable::default();
    let mut resolver = Resolver::new(&contigs, reference(dir.path()), 5);

    let cases = [
        (Query::new("rs1", "1", 10000), MatchStatus::Exact),
        (Query::new("rs2", "chr1", 10047), MatchStatus::Window),
        (Query::new("rs1", "1", 10050), MatchStatus::NotFound),
        (Query::new("rs1", "X", 10000), MatchStatus::MissingContig),
        (Query::new("rs1", "25", 10000), MatchStatus::NoContig),
    ];
    for (query, expected) in cases {
        assert_eq!(resolver.resolve(&query).status, expected, "{query:?}");
    }
}

#[test]
fn test_indexed_exact_row() {
    let dir = TempDir::new().unwrap();
    let contigs = ContigTable::default();
    let mut resolver = Resolver::new(&contigs, reference(dir.path()), 0);

    let row = resolver.resolve(&Query::new("rs2", "1", 10050));
    assert_eq!(row.status, MatchStatus::Exact);
    assert_eq!(row.ref_contig, "NC_000001.11");
    assert_eq!(row.ref_pos, Some(10050));
    assert_eq!(row.alt, "T,G");
    assert_eq!(row.filters, "PASS");
}

#[test]
fn test_declared_contig_without_records_is_not_found() {
    // NC_000007.14 is in the header but absent from the index
    let dir = TempDir::new().unwrap();
    let store = reference(dir.path());
    assert!(store.contains_contig("NC_000007.14"));
    assert_eq!(
        status(store, &Query::new("rs9", "7", 100), 10),
        MatchStatus::NotFound
    );
}

#[test]
fn test_position_zero() {
    let dir = TempDir::new().unwrap();
    let query = Query::new("rs0", "1", 0);
    assert_eq!(status(reference(dir.path()), &query, 0), MatchStatus::NotFound);
    assert_eq!(status(reference(dir.path()), &query, 1), MatchStatus::Window);
}

#[test]
fn test_window_beyond_index_limit_stays_matched() {
    let dir = TempDir::new().unwrap();
    let query = Query::new("rs2", "1", 10047);

    for window in [5, 1_000, 100_000_000, 600_000_000, u64::MAX] {
        assert_eq!(
            status(reference(dir.path()), &query, window),
            MatchStatus::Window,
            "window {window}"
        );
    }
}

#[test]
fn test_contigs_from_index_without_header_lines() {
    let dir = TempDir::new().unwrap();
    let path = write_indexed(dir.path(), "headerless", HEADERLESS_VCF);
    let query = Query::new("rs1", "1", 10000);

    let indexed = IndexedVcfStore::open(&path).unwrap();
    assert!(indexed.contains_contig("NC_000001.11"));
    assert_eq!(status(indexed, &query, 0), MatchStatus::Exact);

    let plain = MemoryStore::from_vcf_reader(HEADERLESS_VCF.as_bytes()).unwrap();
    let contigs = ContigTable::default();
    assert_eq!(
        Resolver::new(&contigs, plain, 0).resolve(&query).status,
        MatchStatus::Exact
    );
}

#[test]
fn test_open_picks_indexed_backend_for_gz() {
    let dir = TempDir::new().unwrap();
    let path = write_indexed(dir.path(), "reference", REFERENCE_VCF);
    let mut store = store::open(&path).unwrap();

    let hits = store.fetch("NC_000001.11", 9999, 10000).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id_field.as_deref(), Some("rs1"));

    // A compressed file without an index cannot be opened
    let bare = dir.path().join("bare.vcf.gz");
    fs::copy(&path, &bare).unwrap();
    assert!(store::open(&bare).is_err());
}

#[test]
fn test_resolve_command_with_indexed_reference() {
    let dir = TempDir::new().unwrap();
    let reference = write_indexed(dir.path(), "reference", REFERENCE_VCF);
    let input = dir.path().join("genome.txt");
    fs::write(&input, "rs1\t1\t10000\tAG\nrs2\t1\t10047\tCT\n").unwrap();

    Command::cargo_bin("rsid-resolver")
        .unwrap()
        .arg("resolve")
        .arg("--input")
        .arg(&input)
        .arg("--reference")
        .arg(&reference)
        .arg("--output")
        .arg(dir.path().join("exact.csv"))
        .arg("--missing-output")
        .arg(dir.path().join("missing.csv"))
        .args(["--window", "600000000"])
        .assert()
        .success();

    let exact = fs::read_to_string(dir.path().join("exact.csv")).unwrap();
    assert_eq!(
        exact.lines().nth(1),
        Some("rs1,1,10000,NC_000001.11,10000,A,G,PASS,exact")
    );
    let missing = fs::read_to_string(dir.path().join("missing.csv")).unwrap();
    assert_eq!(
        missing.lines().nth(1),
        Some("rs2,1,10047,NC_000001.11,10050,C,\"T,G\",PASS,window")
    );
}
