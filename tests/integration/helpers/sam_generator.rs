//! Builders for small SAM text files as written by a bisulfite-aware mapper.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Header lines written at the top of every generated file.
pub const HEADER: &str = "@HD\tVN:1.6\tSO:unsorted\n@SQ\tSN:chr1\tLN:10000\n@PG\tID:bsmap\tPN:bsmap";

/// One alignment record line.
#[derive(Debug, Clone)]
pub struct SamLine {
    name: String,
    flag: u16,
    tags: Vec<String>,
}

impl SamLine {
    /// A mapped record with the given flag, hit count and bisulfite context tag.
    pub fn new(name: &str, flag: u16, hit_count: u32) -> Self {
        Self { name: name.to_string(), flag, tags: vec![format!("NH:i:{hit_count}"), "XB:Z:F1/CT".to_string()] }
    }

    /// Adds an edit distance (`NM`) tag.
    pub fn edit_distance(mut self, nm: u32) -> Self {
        self.tags.push(format!("NM:i:{nm}"));
        self
    }

    /// Adds an arbitrary tag field, e.g. `XR:Z:1`.
    pub fn tag(mut self, field: &str) -> Self {
        self.tags.push(field.to_string());
        self
    }

    /// Removes every tag with the given name.
    pub fn without(mut self, name: &str) -> Self {
        self.tags.retain(|t| !t.starts_with(&format!("{name}:")));
        self
    }

    pub fn render(&self) -> String {
        let (rnext, pnext) = if self.flag & 0x1 == 0 { ("*", 0) } else { ("=", 200) };
        format!(
            "{}\t{}\tchr1\t100\t60\t8M\t{}\t{}\t0\tACGTACGT\tIIIIIIII\t{}",
            self.name,
            self.flag,
            rnext,
            pnext,
            self.tags.join("\t")
        )
    }
}

/// Both mates of a fragment mapped at `hit_count` positions, one record per mate.
pub fn pair(name: &str, hit_count: u32) -> [SamLine; 2] {
    [SamLine::new(name, 99, hit_count).edit_distance(0), SamLine::new(name, 147, hit_count).edit_distance(1)]
}

/// Renders the header and records as SAM text.
pub fn sam_text(records: &[SamLine]) -> String {
    let mut text = String::from(HEADER);
    text.push('\n');
    for record in records {
        text.push_str(&record.render());
        text.push('\n');
    }
    text
}

/// Writes a SAM file into `dir`.
pub fn write_sam(dir: &Path, name: &str, records: &[SamLine]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, sam_text(records)).expect("Failed to write SAM file");
    path
}

/// Runs `bsmapstats mapping-stats` with plotting disabled.
pub fn run_mapping_stats(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bsmapstats"))
        .arg("mapping-stats")
        .arg("--no-plot")
        .args(args)
        .output()
        .expect("Failed to run mapping-stats command")
}
