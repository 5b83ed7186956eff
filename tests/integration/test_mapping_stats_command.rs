//! Integration tests for the mapping-stats command.

use bsmapstats_metrics::{EditDistanceMetric, HitCountMetric, MappingSummaryMetric};
use fgoxide::io::{DelimFile, Io};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

use crate::helpers::{SamLine, pair, run_mapping_stats, sam_text, write_sam};

fn read_hits(path: &Path) -> Vec<HitCountMetric> {
    DelimFile::default().read_tsv(&path).expect("Failed to read hit-count table")
}

fn summary_line<'a>(summary: &'a str, label: &str) -> &'a str {
    summary
        .lines()
        .find(|line| line.starts_with(&format!("{label}:")))
        .unwrap_or_else(|| panic!("No '{label}' line in:\n{summary}"))
}

/// Runs with every table written to a file in `dir`.
fn run_to_files(dir: &Path, extra: &[&str]) -> std::process::Output {
    let paths: Vec<String> = ["summary.txt", "paired.tsv", "mate.tsv", "single.tsv", "nm.tsv"]
        .iter()
        .map(|name| dir.join(name).to_str().unwrap().to_string())
        .collect();
    let mut args = vec![
        "--summary",
        paths[0].as_str(),
        "--paired-hits",
        paths[1].as_str(),
        "--mate-hits",
        paths[2].as_str(),
        "--single-hits",
        paths[3].as_str(),
        "--edit-distances",
        paths[4].as_str(),
    ];
    args.extend_from_slice(extra);
    run_mapping_stats(&args)
}

#[test]
fn test_both_mates_of_one_fragment_count_once() {
    let dir = TempDir::new().unwrap();
    let excluded = write_sam(dir.path(), "excluded.sam", &pair("frag1", 1));

    let output = run_to_files(dir.path(), &["--excluded", excluded.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let paired = read_hits(&dir.path().join("paired.tsv"));
    assert_eq!(paired, vec![HitCountMetric::new(1, 1.0)]);

    let summary = fs::read_to_string(dir.path().join("summary.txt")).unwrap();
    assert!(summary_line(&summary, "Total mappings").ends_with('2'));
    assert!(summary_line(&summary, "Paired-end, both mates mapped, unique").ends_with("1.00 (NA)"));
    assert!(summary_line(&summary, "Total mapped reads").ends_with("1.00 (NA)"));
    assert!(summary_line(&summary, "Total mapped fragments").ends_with("2.00 (NA)"));
    assert!(!summary.contains("Total reads:"));
}

#[test]
fn test_multiply_mapped_single_end_reads_are_divided() {
    let dir = TempDir::new().unwrap();
    let records: Vec<SamLine> = (0..4).map(|i| SamLine::new(&format!("r{}", i / 2), 0, 2).edit_distance(0)).collect();
    let excluded = write_sam(dir.path(), "excluded.sam", &records);

    let output = run_to_files(dir.path(), &["--excluded", excluded.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    assert_eq!(read_hits(&dir.path().join("single.tsv")), vec![HitCountMetric::new(2, 2.0)]);
    let summary = fs::read_to_string(dir.path().join("summary.txt")).unwrap();
    assert!(summary_line(&summary, "Single-end, multiple").ends_with("2.00 (NA)"));
    assert!(summary_line(&summary, "Single-end, unique").ends_with("0.00 (NA)"));
}

#[test]
fn test_missing_edit_distance_is_counted_as_unknown_with_one_warning() {
    let dir = TempDir::new().unwrap();
    let records = vec![
        SamLine::new("a", 0, 1),
        SamLine::new("b", 0, 1).edit_distance(3),
        SamLine::new("c", 16, 1),
        SamLine::new("d", 0, 1),
    ];
    let excluded = write_sam(dir.path(), "excluded.sam", &records);

    let output = run_to_files(dir.path(), &["--excluded", excluded.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let edit_distances: Vec<EditDistanceMetric> =
        DelimFile::default().read_tsv(&dir.path().join("nm.tsv")).unwrap();
    assert_eq!(edit_distances, vec![EditDistanceMetric::new("3", 1), EditDistanceMetric::new("unknown", 3)]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("has no edit distance (NM) tag").count(), 1, "{stderr}");
}

#[test]
fn test_primary_and_excluded_streams_share_counts() {
    let dir = TempDir::new().unwrap();
    let primary = write_sam(dir.path(), "sample.sam", &pair("frag1", 1));
    let excluded = write_sam(
        dir.path(),
        "excluded.sam",
        &[SamLine::new("s1", 0, 1).edit_distance(0), SamLine::new("s2", 0, 1).edit_distance(2)],
    );
    let metrics = dir.path().join("metrics.tsv");

    let output = run_to_files(
        dir.path(),
        &[
            "--input",
            primary.to_str().unwrap(),
            "--excluded",
            excluded.to_str().unwrap(),
            "--total-reads",
            "4",
            "--metrics",
            metrics.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let summary = fs::read_to_string(dir.path().join("summary.txt")).unwrap();
    assert!(summary_line(&summary, "Total reads").ends_with('4'));
    assert!(summary_line(&summary, "Paired-end, both mates mapped, unique").ends_with("1.00 (25.00%)"));
    assert!(summary_line(&summary, "Single-end, unique").ends_with("2.00 (50.00%)"));
    assert!(summary_line(&summary, "Total mapped reads").ends_with("3.00 (75.00%)"));
    // fragments are compared against twice the read total
    assert!(summary_line(&summary, "Total mapped fragments").ends_with("4.00 (50.00%)"));

    let rows: Vec<MappingSummaryMetric> = DelimFile::default().read_tsv(&metrics).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_mappings, 4);
    assert_eq!(rows[0].total_reads_input, Some(4));
    assert_eq!(rows[0].total_fragments_pct, Some(50.0));
}

#[test]
fn test_unconfigured_outputs_go_to_stdout_in_order() {
    let dir = TempDir::new().unwrap();
    let mut records = pair("frag1", 2).to_vec();
    records.push(SamLine::new("m1", 0x1 | 0x8 | 0x40, 1).edit_distance(0));
    records.push(SamLine::new("s1", 0, 3).edit_distance(5));
    let excluded = write_sam(dir.path(), "excluded.sam", &records);

    let output = run_mapping_stats(&["--excluded", excluded.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let positions: Vec<usize> = ["Total mappings:", "2\t0.5", "1\t1.0", "3\t0.3333", "edit_distance\tcount"]
        .iter()
        .map(|needle| stdout.find(needle).unwrap_or_else(|| panic!("'{needle}' missing from:\n{stdout}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "outputs out of order:\n{stdout}");
}

#[test]
fn test_gzipped_input_is_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("excluded.sam.gz");
    let mut writer = Io::default().new_writer(&path).unwrap();
    writer.write_all(sam_text(&pair("frag1", 1)).as_bytes()).unwrap();
    writer.flush().unwrap();
    drop(writer);

    let output = run_to_files(dir.path(), &["--excluded", path.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(read_hits(&dir.path().join("paired.tsv")), vec![HitCountMetric::new(1, 1.0)]);
}

#[test]
fn test_missing_plotting_tool_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    let excluded = write_sam(dir.path(), "excluded.sam", &pair("frag1", 1));
    let plot = dir.path().join("plots.pdf");

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_bsmapstats"))
        .args(["mapping-stats", "--excluded", excluded.to_str().unwrap(), "--plot", plot.to_str().unwrap()])
        .env("PATH", dir.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(!plot.exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Skipping plot generation"));
}
