//! Reading SAM text from standard input.

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

use crate::helpers::{SamLine, pair, sam_text, write_sam};

#[test]
fn test_excluded_from_stdin() {
    let dir = TempDir::new().unwrap();
    let primary = write_sam(dir.path(), "primary.sam", &pair("frag1", 1));
    let single = dir.path().join("single.tsv");

    let mut child = Command::new(env!("CARGO_BIN_EXE_bsmapstats"))
        .args([
            "mapping-stats",
            "--no-plot",
            "--input",
            primary.to_str().unwrap(),
            "--excluded",
            "-",
            "--single-hits",
            single.to_str().unwrap(),
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run mapping-stats command");

    let text = sam_text(&[SamLine::new("s1", 0, 2).edit_distance(0), SamLine::new("s1", 16, 2).edit_distance(1)]);
    child.stdin.take().unwrap().write_all(text.as_bytes()).unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    assert_eq!(std::fs::read_to_string(&single).unwrap(), "hit_count\tfrequency\n2\t1.0\n");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Total mappings:"), "{stdout}");
}
