//! Error path integration tests.
//!
//! Every invalid record or argument must abort the run with a non-zero exit status
//! before any output file is created.

use rstest::rstest;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

use crate::helpers::{SamLine, pair, run_mapping_stats, write_sam};

const OUTPUTS: [&str; 5] = ["summary.txt", "paired.tsv", "mate.tsv", "single.tsv", "nm.tsv"];

fn output_args(dir: &Path) -> Vec<String> {
    let mut args = Vec::new();
    for (option, name) in ["--summary", "--paired-hits", "--mate-hits", "--single-hits", "--edit-distances"]
        .iter()
        .zip(OUTPUTS)
    {
        args.push((*option).to_string());
        args.push(dir.join(name).to_str().unwrap().to_string());
    }
    args
}

fn assert_no_outputs(dir: &Path) {
    for name in OUTPUTS {
        assert!(!dir.join(name).exists(), "{name} should not have been created");
    }
}

#[rstest]
#[case::unmapped(SamLine::new("bad", 0x4, 1), "is unmapped")]
#[case::realigned(SamLine::new("bad", 0, 1).tag("XR:Z:1"), "realigned")]
#[case::split_a(SamLine::new("bad", 0, 1).tag("XX:i:1"), "split")]
#[case::split_b(SamLine::new("bad", 0, 1).tag("XY:i:1"), "split")]
#[case::no_context(SamLine::new("bad", 0, 1).without("XB"), "bisulfite context")]
#[case::no_hit_count(SamLine::new("bad", 0, 1).without("NH"), "hit count")]
#[case::first_and_last(SamLine::new("bad", 0x1 | 0x40 | 0x80, 1), "inconsistent pairing flags")]
#[case::unpaired_with_segment(SamLine::new("bad", 0x40, 1), "inconsistent pairing flags")]
fn test_invalid_record_aborts_without_output(#[case] bad: SamLine, #[case] message: &str) {
    let dir = TempDir::new().unwrap();
    let mut records = pair("good", 1).to_vec();
    records.push(bad);
    let excluded = write_sam(dir.path(), "excluded.sam", &records);

    let mut args = vec!["--excluded".to_string(), excluded.to_str().unwrap().to_string()];
    args.extend(output_args(dir.path()));
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = run_mapping_stats(&args);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    // three header lines, two good records, then the bad one
    assert!(stderr.contains("Invalid record at line 6 of the excluded input"), "{stderr}");
    assert!(stderr.contains(message), "{stderr}");
    assert!(output.stdout.is_empty());
    assert_no_outputs(dir.path());
}

#[test]
fn test_invalid_primary_record_stops_before_excluded() {
    let dir = TempDir::new().unwrap();
    let primary = write_sam(dir.path(), "primary.sam", &[SamLine::new("bad", 0x4, 1)]);
    let excluded = write_sam(dir.path(), "excluded.sam", &pair("good", 1));

    let output = run_mapping_stats(&["--input", primary.to_str().unwrap(), "--excluded", excluded.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("of the primary input"), "{stderr}");
    assert!(!stderr.contains("Reading the excluded input"), "{stderr}");
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.sam");
    let output = run_mapping_stats(&["--excluded", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("File does not exist"));
}

#[test]
fn test_stdin_used_twice() {
    let output = run_mapping_stats(&["--input", "-", "--excluded", "-"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("standard input is already used"));
}

#[test]
fn test_excluded_is_required() {
    let output = run_mapping_stats(&[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--excluded"));
}

#[test]
fn test_unwritable_destination_aborts() {
    let dir = TempDir::new().unwrap();
    let excluded = write_sam(dir.path(), "excluded.sam", &pair("good", 1));
    let unwritable = dir.path().join("no-such-dir").join("nm.tsv");

    let output = run_mapping_stats(&[
        "--excluded",
        excluded.to_str().unwrap(),
        "--edit-distances",
        unwritable.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "nothing is written to the console when a file cannot be created");
}

#[test]
fn test_failed_run_keeps_previous_outputs() {
    let dir = TempDir::new().unwrap();
    let excluded = write_sam(dir.path(), "excluded.sam", &pair("good", 1));
    let summary = dir.path().join("summary.txt");
    std::fs::write(&summary, "previous summary\n").unwrap();
    let unwritable = dir.path().join("no-such-dir").join("nm.tsv");

    let output = run_mapping_stats(&[
        "--excluded",
        excluded.to_str().unwrap(),
        "--summary",
        summary.to_str().unwrap(),
        "--edit-distances",
        unwritable.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert_eq!(std::fs::read_to_string(&summary).unwrap(), "previous summary\n");
}

#[test]
fn test_fatal_error_is_reported_with_logging_disabled() {
    let dir = TempDir::new().unwrap();
    let excluded = write_sam(dir.path(), "excluded.sam", &[SamLine::new("bad", 0x4, 1)]);

    let output = Command::new(env!("CARGO_BIN_EXE_bsmapstats"))
        .args(["mapping-stats", "--no-plot", "--excluded", excluded.to_str().unwrap()])
        .env("RUST_LOG", "off")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid record at line 4 of the excluded input"), "{stderr}");
    assert!(stderr.contains("is unmapped"), "{stderr}");
}
