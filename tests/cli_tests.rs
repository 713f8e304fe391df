//! End-to-end tests for the rsid-resolver binary
//!
//! Each test writes a small dbSNP-style VCF and a genotype file into a
//! temporary directory, runs the CLI, and inspects the CSV outputs.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const REFERENCE_VCF: &str = "##fileformat=VCFv4.2
##contig=<ID=NC_000001.11,length=248956422>
##contig=<ID=NC_000007.14,length=159345973>
##INFO=<ID=RS,Number=1,Type=Integer,Description=\"dbSNP ID\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
NC_000001.11\t10000\trs1\tA\tG\t.\t.\tRS=1
NC_000001.11\t10050\t.\tC\tT,G\t.\t.\tRS=2
NC_000001.11\t10100\trs3;rs33\tG\tA\t.\t.\t.
NC_000007.14\t117559590\trs113993960\tATCT\tA\t.\t.\tRS=113993960
";

fn setup(genotypes: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let reference = dir.path().join("reference.vcf");
    let input = dir.path().join("genome.txt");
    fs::write(&reference, REFERENCE_VCF).expect("Failed to write reference");
    fs::write(&input, genotypes).expect("Failed to write genotypes");
    (dir, reference, input)
}

fn resolve_cmd(dir: &Path, reference: &Path, input: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rsid-resolver").expect("binary builds");
    cmd.arg("resolve")
        .arg("--input")
        .arg(input)
        .arg("--reference")
        .arg(reference)
        .arg("--output")
        .arg(dir.join("exact.csv"))
        .arg("--missing-output")
        .arg(dir.join("missing.csv"));
    cmd
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).expect("Failed to read output")
}

const HEADER: &str = "query_rsid,query_chrom,query_pos,ref_contig,ref_pos,ref,alt,filters,status";

#[test]
fn test_exact_match_row() {
    let (dir, reference, input) = setup("# rsid\tchromosome\tposition\tgenotype\nrs1\t1\t10000\tAG\n");

    resolve_cmd(dir.path(), &reference, &input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 exact rows"))
        .stdout(predicate::str::contains("and 0 non-exact rows"));

    assert_eq!(
        read(dir.path(), "exact.csv"),
        format!("{HEADER}\nrs1,1,10000,NC_000001.11,10000,A,G,PASS,exact\n")
    );
    // No non-exact rows, so no header either
    assert_eq!(read(dir.path(), "missing.csv"), "");
}

#[test]
fn test_rs_mismatch_is_not_found() {
    let (dir, reference, input) = setup("rs1\t1\t10050\tCC\n");

    resolve_cmd(dir.path(), &reference, &input).assert().success();

    assert_eq!(read(dir.path(), "exact.csv"), "");
    assert_eq!(
        read(dir.path(), "missing.csv"),
        format!("{HEADER}\nrs1,1,10050,,,,,,not_found\n")
    );
}

#[test]
fn test_rs_cross_reference_matches() {
    let (dir, reference, input) = setup("rs2\tchr1\t10050\tCT\n");

    resolve_cmd(dir.path(), &reference, &input).assert().success();

    assert_eq!(
        read(dir.path(), "exact.csv").lines().nth(1),
        Some("rs2,chr1,10050,NC_000001.11,10050,C,\"T,G\",PASS,exact")
    );
}

#[test]
fn test_unmapped_and_missing_contigs() {
    let (dir, reference, input) = setup("rs9\t25\t100\tAA\nrs9\tX\t100\tAA\nrs33\tCHR1\t10100\tGG\n");

    resolve_cmd(dir.path(), &reference, &input).assert().success();

    let missing = read(dir.path(), "missing.csv");
    let rows: Vec<&str> = missing.lines().skip(1).collect();
    assert_eq!(
        rows,
        vec!["rs9,25,100,,,,,,no_contig", "rs9,X,100,,,,,,missing_contig"]
    );
    assert!(read(dir.path(), "exact.csv").contains("rs33,CHR1,10100,NC_000001.11,10100,G,A,PASS,exact"));
}

#[test]
fn test_window_fallback() {
    let (dir, reference, input) = setup("rs1\t1\t10003\tAG\n");

    resolve_cmd(dir.path(), &reference, &input)
        .assert()
        .success();
    assert!(read(dir.path(), "missing.csv").contains("not_found"));

    resolve_cmd(dir.path(), &reference, &input)
        .args(["--window", "5"])
        .assert()
        .success();
    assert_eq!(
        read(dir.path(), "missing.csv").lines().nth(1),
        Some("rs1,1,10003,NC_000001.11,10000,A,G,PASS,window")
    );
    assert_eq!(read(dir.path(), "exact.csv"), "");
}

#[test]
fn test_limit_and_malformed_lines() {
    let (dir, reference, input) = setup(
        "#comment\nrs1\t1\t10000\nshort\t1\nrs1\t1\tten\nrs3\t1\t10100\nrs2\t1\t10050\n",
    );

    resolve_cmd(dir.path(), &reference, &input)
        .args(["--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 exact rows"));

    let exact = read(dir.path(), "exact.csv");
    assert_eq!(exact.lines().count(), 3);
    assert!(!exact.contains("rs2,"));
}

#[test]
fn test_gzip_input() {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let (dir, reference, _) = setup("");
    let input = dir.path().join("genome.txt.gz");
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(b"rs1\t1\t10000\tAG\n").unwrap();
    fs::write(&input, encoder.finish().unwrap()).unwrap();

    resolve_cmd(dir.path(), &reference, &input).assert().success();
    assert!(read(dir.path(), "exact.csv").contains(",exact"));
}

#[test]
fn test_creates_output_directories() {
    let (dir, reference, input) = setup("rs1\t1\t10000\tAG\n");
    let nested = dir.path().join("out/nested");

    Command::cargo_bin("rsid-resolver")
        .unwrap()
        .arg("resolve")
        .arg("-i")
        .arg(&input)
        .arg("-r")
        .arg(&reference)
        .arg("-o")
        .arg(nested.join("exact.csv"))
        .arg("--missing-output")
        .arg(nested.join("missing.csv"))
        .assert()
        .success();

    assert!(nested.join("exact.csv").exists());
    assert!(nested.join("missing.csv").exists());
}

#[test]
fn test_json_summary() {
    let (dir, reference, input) = setup("rs1\t1\t10000\nrs9\t25\t1\nbad line\nrs2\t1\tx\n");

    let output = resolve_cmd(dir.path(), &reference, &input)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["queries"], 2);
    assert_eq!(summary["exact_rows"], 1);
    assert_eq!(summary["non_exact_rows"], 1);
    assert_eq!(summary["skipped_lines"], 2);
    assert!(summary["exact_output"].as_str().unwrap().ends_with("exact.csv"));
    assert_eq!(summary["by_status"]["no_contig"], 1);
    assert_eq!(summary["by_status"]["window"], 0);
}

#[test]
fn test_missing_input_is_fatal() {
    let (dir, reference, _) = setup("");
    let absent = dir.path().join("absent.txt");

    resolve_cmd(dir.path(), &reference, &absent)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing genotype file"));
    assert!(!dir.path().join("exact.csv").exists());
}

#[test]
fn test_missing_reference_is_fatal() {
    let (dir, _, input) = setup("rs1\t1\t10000\n");
    let absent = dir.path().join("absent.vcf.gz");

    resolve_cmd(dir.path(), &absent, &input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing reference VCF"));
}

#[test]
fn test_custom_contig_map() {
    let (dir, reference, input) = setup("rs1\tone\t10000\n");
    let map = dir.path().join("contigs.tsv");
    fs::write(&map, "label\taccession\none\tNC_000001.11\n").unwrap();

    resolve_cmd(dir.path(), &reference, &input)
        .arg("--contig-map")
        .arg(&map)
        .assert()
        .success();
    assert!(read(dir.path(), "exact.csv").contains("rs1,one,10000,NC_000001.11"));
}

#[test]
fn test_lookup_command() {
    let (dir, reference, _) = setup("");

    Command::cargo_bin("rsid-resolver")
        .unwrap()
        .args(["lookup", "rs113993960", "chr7", "117559590", "--reference"])
        .arg(&reference)
        .assert()
        .success()
        .stdout(predicate::str::contains("-> exact"))
        .stdout(predicate::str::contains("ATCT > A"));

    Command::cargo_bin("rsid-resolver")
        .unwrap()
        .args(["lookup", "rs1", "chrZ", "1", "--format", "tsv", "--reference"])
        .arg(dir.path().join("reference.vcf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("rs1\tchrZ\t1\t\t\t\t\t\tno_contig"));
}

#[test]
fn test_contigs_command() {
    Command::cargo_bin("rsid-resolver")
        .unwrap()
        .arg("contigs")
        .assert()
        .success()
        .stdout(predicate::str::contains("NC_000001.11"))
        .stdout(predicate::str::contains("NC_012920.1"));

    Command::cargo_bin("rsid-resolver")
        .unwrap()
        .args(["contigs", "--assembly", "grch37", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7\tNC_000007.13"));
}
