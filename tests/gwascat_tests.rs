//! GWAS catalog annotation tests
//!
//! Runs the `gwascat` subcommand against small catalog and VCF files.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const VCF: &str = "##fileformat=VCFv4.1\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
chr1\t1000\trs1\tA\tG\t.\tPASS\tDP=10\n\
chr1\t2000\trs2\tC\tT\t.\tPASS\t.\n\
2\t500\trs3\tG\tA\t.\tPASS\t.\n";

const CATALOG: &str = "CHR_ID\tCHR_POS\tDISEASE/TRAIT\tSNPS\tPUBMEDID\tMAPPED_GENE\n\
1\t1000\tT1\trs1\t123\tGENE1\n\
1\t1000\tT2\trs1\t456\tGENE1\n\
2\t500\tType 2 diabetes\trs3\t789\t\n\
not-a-position-line\n";

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn varsift() -> Command {
    let mut cmd = Command::cargo_bin("varsift").unwrap();
    cmd.env_remove("VARSIFT_GWASCAT_DB");
    cmd
}

fn data_lines(vcf: &str) -> Vec<&str> {
    vcf.lines().filter(|l| !l.starts_with('#')).collect()
}

#[test]
fn test_annotates_with_database_option() {
    let dir = tempfile::tempdir().unwrap();
    let db = write(dir.path(), "gwascatalog.txt", CATALOG);
    let vcf = write(dir.path(), "calls.vcf", VCF);

    let output = varsift()
        .arg("gwascat")
        .arg("--db")
        .arg(&db)
        .arg(&vcf)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("##INFO=<ID=GWASCAT,Number=.,Type=String,"));
    assert_eq!(
        data_lines(&stdout),
        vec![
            "chr1\t1000\trs1\tA\tG\t.\tPASS\tDP=10;GWASCAT=T1,T2",
            "chr1\t2000\trs2\tC\tT\t.\tPASS\t.",
            "2\t500\trs3\tG\tA\t.\tPASS\tGWASCAT=Type_2_diabetes",
        ]
    );

    // The declaration sits right before the column header line
    let header: Vec<&str> = stdout.lines().take_while(|l| l.starts_with('#')).collect();
    assert!(header[header.len() - 2].starts_with("##INFO=<ID=GWASCAT"));
    assert!(header[header.len() - 1].starts_with("#CHROM"));
}

#[test]
fn test_database_from_environment_and_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let db = write(dir.path(), "gwascatalog.txt", CATALOG);

    varsift()
        .env("VARSIFT_GWASCAT_DB", &db)
        .args(["gwascat", "-"])
        .write_stdin(VCF)
        .assert()
        .success()
        .stdout(predicate::str::contains("DP=10;GWASCAT=T1,T2"));
}

#[test]
fn test_custom_field_and_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let db = write(dir.path(), "gwascatalog.txt", CATALOG);
    let vcf = write(dir.path(), "calls.vcf", VCF);
    let out = dir.path().join("calls.gwas.vcf");

    varsift()
        .arg("gwascat")
        .arg("--db")
        .arg(&db)
        .args(["--field", "TRAITS", "-o"])
        .arg(&out)
        .arg(&vcf)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("##INFO=<ID=TRAITS,"));
    assert!(written.contains("PASS\tTRAITS=T1,T2"));
}

#[test]
fn test_verbose_summary_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let db = write(dir.path(), "gwascatalog.txt", CATALOG);
    let vcf = write(dir.path(), "calls.vcf", VCF);

    varsift()
        .args(["--verbose", "--format", "tsv", "gwascat", "--db"])
        .arg(&db)
        .arg(&vcf)
        .assert()
        .success()
        .stderr(predicate::str::contains("annotated\tprocessed\tpercent"))
        .stderr(predicate::str::contains("2\t3\t66.6667"))
        .stdout(predicate::str::starts_with("##fileformat=VCFv4.1"));
}

#[test]
fn test_missing_database_option_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let vcf = write(dir.path(), "calls.vcf", VCF);

    varsift()
        .arg("gwascat")
        .arg(&vcf)
        .assert()
        .failure()
        .stderr(predicate::str::contains("VARSIFT_GWASCAT_DB"));
}

#[test]
fn test_unreadable_database_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let vcf = write(dir.path(), "calls.vcf", VCF);

    varsift()
        .arg("gwascat")
        .arg("--db")
        .arg(dir.path().join("nope.txt"))
        .arg(&vcf)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("nope.txt"));
}

#[test]
fn test_header_only_input_still_gets_declaration() {
    let dir = tempfile::tempdir().unwrap();
    let db = write(dir.path(), "gwascatalog.txt", CATALOG);
    let header_only: String = VCF.lines().take(2).map(|l| format!("{l}\n")).collect();
    let vcf = write(dir.path(), "empty.vcf", &header_only);

    varsift()
        .arg("gwascat")
        .arg("--db")
        .arg(&db)
        .arg(&vcf)
        .assert()
        .success()
        .stdout(predicate::str::contains("##INFO=<ID=GWASCAT"))
        .stdout(predicate::str::ends_with("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n"));
}
