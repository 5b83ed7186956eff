//! Common CLI options shared across commands.
//!
//! This module provides shared argument structures that can be composed into
//! command structs using `#[command(flatten)]`.

use std::path::{Path, PathBuf};

use clap::Args;

use bsmapstats_lib::render::ReportDestinations;
use bsmapstats_lib::source::{DEFAULT_SAMTOOLS, is_stdin_path};
use bsmapstats_lib::validation::{validate_distinct_outputs, validate_inputs};

/// Alignment inputs of a mapping-statistics run.
#[derive(Debug, Clone, Args)]
pub struct AlignmentInputOptions {
    /// Primary alignments (SAM, SAM.gz, BAM or CRAM; `-` for SAM on stdin)
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Alignments excluded upstream (SAM, SAM.gz, BAM or CRAM; `-` for SAM on stdin)
    #[arg(short = 'e', long = "excluded")]
    pub excluded: PathBuf,

    /// Number of sequenced reads; enables percentages in the summary
    #[arg(short = 'n', long = "total-reads")]
    pub total_reads: Option<u64>,

    /// Executable used to convert BAM/CRAM inputs to SAM text
    #[arg(long = "samtools", default_value = DEFAULT_SAMTOOLS)]
    pub samtools: String,
}

impl AlignmentInputOptions {
    /// The streams to read, in order, with their names.
    pub fn streams(&self) -> Vec<(&Path, &'static str)> {
        let mut streams = Vec::with_capacity(2);
        if let Some(input) = &self.input {
            streams.push((input.as_path(), "primary"));
        }
        streams.push((self.excluded.as_path(), "excluded"));
        streams
    }

    /// Validates that file inputs exist and that stdin is used at most once.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid input.
    pub fn validate(&self) -> anyhow::Result<()> {
        let inputs: Vec<(&Path, String)> =
            self.streams().into_iter().map(|(path, name)| (path, format!("{name} input"))).collect();
        let inputs: Vec<(&Path, &str)> = inputs.iter().map(|(path, name)| (*path, name.as_str())).collect();
        validate_inputs(&inputs)?;
        Ok(())
    }
}

/// Destinations of the summary and tables; unset outputs go to standard output.
#[derive(Debug, Clone, Default, Args)]
pub struct ReportOutputOptions {
    /// Output file for the summary block
    #[arg(long = "summary")]
    pub summary: Option<PathBuf>,

    /// Output TSV for the hit-count table of pairs with both mates mapped
    #[arg(long = "paired-hits")]
    pub paired_hits: Option<PathBuf>,

    /// Output TSV for the hit-count table of pairs with one mate mapped
    #[arg(long = "mate-hits")]
    pub mate_hits: Option<PathBuf>,

    /// Output TSV for the hit-count table of single-end reads
    #[arg(long = "single-hits")]
    pub single_hits: Option<PathBuf>,

    /// Output TSV for the edit-distance table
    #[arg(long = "edit-distances")]
    pub edit_distances: Option<PathBuf>,

    /// Optional one-row TSV with every summary figure
    #[arg(long = "metrics")]
    pub metrics: Option<PathBuf>,
}

impl ReportOutputOptions {
    fn named(&self) -> Vec<(&Path, &'static str)> {
        [
            (&self.summary, "summary"),
            (&self.paired_hits, "paired-hits"),
            (&self.mate_hits, "mate-hits"),
            (&self.single_hits, "single-hits"),
            (&self.edit_distances, "edit-distances"),
            (&self.metrics, "metrics"),
        ]
        .into_iter()
        .filter_map(|(path, name)| path.as_deref().map(|p| (p, name)))
        .collect()
    }

    /// Validates that no two outputs, or an output and an input, share a path.
    ///
    /// # Errors
    ///
    /// Returns an error naming the clashing option.
    pub fn validate(&self, inputs: &AlignmentInputOptions, plot: Option<&Path>) -> anyhow::Result<()> {
        let input_paths: Vec<&Path> =
            inputs.streams().into_iter().map(|(path, _)| path).filter(|p| !is_stdin_path(p)).collect();
        let mut outputs = self.named();
        if let Some(plot) = plot {
            outputs.push((plot, "plot"));
        }
        validate_distinct_outputs(&input_paths, &outputs)?;
        Ok(())
    }

    /// Converts the options into render destinations.
    pub fn destinations(&self) -> ReportDestinations {
        ReportDestinations {
            summary: self.summary.clone(),
            paired_hits: self.paired_hits.clone(),
            mate_hits: self.mate_hits.clone(),
            single_hits: self.single_hits.clone(),
            edit_distances: self.edit_distances.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

/// Options controlling the plot artifact.
#[derive(Debug, Clone, Default, Args)]
pub struct PlotOptions {
    /// Output PDF for the plots [default: <input stem>.mapping_stats.pdf]
    #[arg(long = "plot", conflicts_with = "no_plot")]
    pub plot: Option<PathBuf>,

    /// Do not generate plots
    #[arg(long = "no-plot", default_value = "false")]
    pub no_plot: bool,

    /// Optional sample name or description for the plot title
    #[arg(long = "description")]
    pub description: Option<String>,
}

/// File name used for the plot when there is no primary input to name it after.
pub const DEFAULT_PLOT_NAME: &str = "mapping_stats.pdf";

impl PlotOptions {
    /// Where the plot goes, or `None` if plotting is disabled.
    ///
    /// Defaults to `<primary stem>.mapping_stats.pdf` next to the primary input, or
    /// [`DEFAULT_PLOT_NAME`] when the primary input is absent or standard input.
    pub fn plot_path(&self, primary: Option<&Path>) -> Option<PathBuf> {
        if self.no_plot {
            return None;
        }
        if let Some(plot) = &self.plot {
            return Some(plot.clone());
        }
        let default = primary.filter(|p| !is_stdin_path(p)).and_then(|p| {
            let stem = p.file_name()?.to_str()?;
            let stem = [".sam.gz", ".sam", ".bam", ".cram"]
                .iter()
                .find_map(|ext| stem.strip_suffix(ext))
                .unwrap_or(stem);
            Some(p.with_file_name(format!("{stem}.mapping_stats.pdf")))
        });
        Some(default.unwrap_or_else(|| PathBuf::from(DEFAULT_PLOT_NAME)))
    }

    /// The plot title.
    pub fn title(&self) -> String {
        match &self.description {
            Some(description) => format!("Mapping statistics: {description}"),
            None => "Mapping statistics".to_string(),
        }
    }
}
