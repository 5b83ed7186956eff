//! Summarize how bisulfite-sequencing reads mapped.

use std::io::BufWriter;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};

use bsmapstats_lib::accumulator::FrequencyAccumulator;
use bsmapstats_lib::aggregate::aggregate_source;
use bsmapstats_lib::logging::{OperationTimer, log_mapping_summary};
use bsmapstats_lib::plot::{RscriptPlotter, render_plot};
use bsmapstats_lib::report::MappingReport;
use bsmapstats_lib::source::LineSource;

use crate::commands::command::Command;
use crate::commands::common::{AlignmentInputOptions, PlotOptions, ReportOutputOptions};

/// Computes unique/multiple mapping statistics for bisulfite alignments
#[derive(Parser, Debug)]
#[command(
    name = "mapping-stats",
    author,
    version,
    about = "\x1b[38;5;173m[QC]\x1b[0m \x1b[36mSummarize unique and multiple mapping of bisulfite reads\x1b[0m",
    long_about = r#"
Summarizes how the reads of a bisulfite-sequencing run mapped: how many mapped to a single
position and how many to several, split by pairing status, plus the distribution of edit
distances.

## Inputs

Two alignment streams are read one after the other into the same counts:

1. `--input`: the primary alignments (optional)
2. `--excluded`: the alignments removed by upstream filtering (required)

Each may be SAM text (optionally gzip compressed), BAM or CRAM (converted with
`samtools view`), or `-` for SAM text on standard input. Only one stream may be `-`.

Every record must be mapped and carry the hit count (`NH`) and bisulfite context (`XB`)
tags, and must not carry the split-read (`XX`, `XY`) or realigned (`XR`) markers. Any
violation aborts the run before output is written. Records without an edit distance
(`NM`) are counted under `unknown`, with a single warning.

## Counting

Records are grouped into pairs with both mates mapped, pairs with one mate mapped, and
single-end reads. A read reported at `n` positions contributes one record per position
(two per position for a pair with both mates mapped), so counts at hit count `n` are
divided by `n` (or `2n`) to count reads. With `--total-reads`, every figure is also
reported as a percentage of the read total; fragments are compared against twice that.

## Outputs

Each output goes to standard output unless a file is given:

1. `--summary`: the summary block
2. `--paired-hits`, `--mate-hits`, `--single-hits`: `hit_count`/`frequency` tables
3. `--edit-distances`: the `edit_distance`/`count` table
4. `--metrics`: (optional) every summary figure as a one-row TSV
5. `--plot`: (optional) a PDF of the four distributions. This file is only produced if R is
   available with the ggplot2 package. Use `--no-plot` to skip it.
"#
)]
pub struct MappingStats {
    #[command(flatten)]
    pub inputs: AlignmentInputOptions,

    #[command(flatten)]
    pub outputs: ReportOutputOptions,

    #[command(flatten)]
    pub plot: PlotOptions,
}

impl Command for MappingStats {
    fn execute(&self, command_line: &str) -> Result<()> {
        info!("MappingStats");
        info!("  Command line: {command_line}");
        if let Some(input) = &self.inputs.input {
            info!("  Input: {}", input.display());
        }
        info!("  Excluded: {}", self.inputs.excluded.display());
        if let Some(total) = self.inputs.total_reads {
            info!("  Total reads: {total}");
        }

        let plot_path = self.plot.plot_path(self.inputs.input.as_deref());
        self.inputs.validate()?;
        self.outputs.validate(&self.inputs, plot_path.as_deref())?;
        if self.inputs.total_reads == Some(0) {
            warn!("--total-reads is 0; percentages will not be reported");
        }

        let timer = OperationTimer::new("Aggregating alignment records");
        let mut acc = FrequencyAccumulator::new();
        for (path, stream) in self.inputs.streams() {
            let source = LineSource::open(path, &self.inputs.samtools)?;
            aggregate_source(source, stream, &mut acc)?;
        }
        timer.log_completion(acc.total_mappings());
        if acc.records_missing_edit_distance() > 0 {
            info!("{} records had no edit distance (NM) tag", acc.records_missing_edit_distance());
        }

        let report = MappingReport::compute(&acc, self.inputs.total_reads);
        log_mapping_summary(&report);

        let mut console = BufWriter::new(std::io::stdout().lock());
        self.outputs.destinations().write_all(&report, &mut console)?;

        if let Some(path) = plot_path {
            render_plot(&RscriptPlotter, &report, &path, &self.plot.title());
        }

        info!("Done");
        Ok(())
    }
}
