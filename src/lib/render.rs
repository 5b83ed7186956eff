//! Formatting of the summary report and the per-class frequency tables.
//!
//! Every output has its own optional destination. Outputs without a destination go to
//! a shared console writer, in the order summary, paired, mate, single, edit distance.
//! File destinations are staged as temporary files and moved into place together, so a
//! destination that cannot be created aborts the run without touching other outputs.

use anyhow::{Context, Result};
use bsmapstats_metrics::{format_count, format_float, write_metrics_to};
use fgoxide::io::Io;
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::report::MappingReport;
use crate::sam::MateClass;

/// Text rendered in place of a percentage when no read total was supplied.
pub const UNAVAILABLE_PERCENTAGE: &str = "(NA)";

/// Width of the label column in the summary block.
const LABEL_WIDTH: usize = 46;

/// Formats a percentage as `(12.34%)`, or [`UNAVAILABLE_PERCENTAGE`].
#[must_use]
pub fn format_percentage(percentage: Option<f64>) -> String {
    match percentage {
        Some(value) => format!("({}%)", format_float(value)),
        None => UNAVAILABLE_PERCENTAGE.to_string(),
    }
}

/// Writes the human-readable summary block.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_summary<W: Write + ?Sized>(report: &MappingReport, out: &mut W) -> std::io::Result<()> {
    line(out, "Total mappings", format_count(report.total_mappings()))?;
    if let Some(total) = report.total_reads_input() {
        line(out, "Total reads", format_count(total))?;
    }
    for figures in report.classes() {
        let description = figures.class.description();
        line(
            out,
            &format!("{description}, unique"),
            format!("{} {}", format_float(figures.unique), format_percentage(figures.unique_pct)),
        )?;
        line(
            out,
            &format!("{description}, multiple"),
            format!("{} {}", format_float(figures.multiple), format_percentage(figures.multiple_pct)),
        )?;
    }
    line(
        out,
        "Total mapped reads",
        format!("{} {}", format_float(report.total_reads()), format_percentage(report.total_reads_pct())),
    )?;
    line(
        out,
        "Total mapped fragments",
        format!(
            "{} {}",
            format_float(report.total_fragments()),
            format_percentage(report.total_fragments_pct())
        ),
    )?;
    Ok(())
}

fn line<W: Write + ?Sized>(out: &mut W, label: &str, value: String) -> std::io::Result<()> {
    writeln!(out, "{:<width$}{value}", format!("{label}:"), width = LABEL_WIDTH)
}

/// Writes the normalized hit-count table of one class as TSV.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_hit_table<W: Write>(report: &MappingReport, class: MateClass, out: W) -> Result<()> {
    write_metrics_to(out, report.hit_table(class))
        .with_context(|| format!("Failed to write the {} hit-count table", class.label()))
}

/// Writes the raw edit-distance table as TSV.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_edit_distance_table<W: Write>(report: &MappingReport, out: W) -> Result<()> {
    write_metrics_to(out, &report.edit_distance_table()).context("Failed to write the edit-distance table")
}

/// One of the rendered outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Summary,
    HitTable(MateClass),
    EditDistances,
    /// Only written when a destination is configured.
    SummaryMetric,
}

impl Output {
    const ALL: [Output; 6] = [
        Self::Summary,
        Self::HitTable(MateClass::PairedBothMapped),
        Self::HitTable(MateClass::MateOnlyOneMapped),
        Self::HitTable(MateClass::SingleEnd),
        Self::EditDistances,
        Self::SummaryMetric,
    ];

    fn write(self, report: &MappingReport, out: &mut dyn Write) -> Result<()> {
        match self {
            Self::Summary => write_summary(report, out).context("Failed to write the summary"),
            Self::HitTable(class) => write_hit_table(report, class, out),
            Self::EditDistances => write_edit_distance_table(report, out),
            Self::SummaryMetric => write_metrics_to(out, &[report.to_summary_metric()])
                .context("Failed to write the summary metrics"),
        }
    }

    fn description(self) -> String {
        match self {
            Self::Summary => "mapping summary".to_string(),
            Self::HitTable(class) => format!("{} hit-count table", class.label()),
            Self::EditDistances => "edit-distance table".to_string(),
            Self::SummaryMetric => "summary metrics".to_string(),
        }
    }
}

/// Destinations for each rendered output; `None` means the console.
///
/// The one-row summary metrics file is the exception: it is skipped when `metrics` is
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDestinations {
    pub summary: Option<PathBuf>,
    pub paired_hits: Option<PathBuf>,
    pub mate_hits: Option<PathBuf>,
    pub single_hits: Option<PathBuf>,
    pub edit_distances: Option<PathBuf>,
    pub metrics: Option<PathBuf>,
}

impl ReportDestinations {
    fn destination(&self, output: Output) -> Option<&Path> {
        match output {
            Output::Summary => self.summary.as_deref(),
            Output::HitTable(MateClass::PairedBothMapped) => self.paired_hits.as_deref(),
            Output::HitTable(MateClass::MateOnlyOneMapped) => self.mate_hits.as_deref(),
            Output::HitTable(MateClass::SingleEnd) => self.single_hits.as_deref(),
            Output::EditDistances => self.edit_distances.as_deref(),
            Output::SummaryMetric => self.metrics.as_deref(),
        }
    }

    /// Writes every output to its destination, using `console` for those without one.
    ///
    /// File outputs are first written to temporary files next to their destination and
    /// only moved into place once every output has been written, so a failed run leaves
    /// existing files untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if a destination cannot be created or any write fails.
    pub fn write_all(&self, report: &MappingReport, console: &mut dyn Write) -> Result<()> {
        let mut staged = Vec::with_capacity(Output::ALL.len());
        for output in Output::ALL {
            let file = match self.destination(output) {
                Some(path) => Some((path, stage(path)?)),
                None => None,
            };
            staged.push((output, file));
        }

        let io = Io::default();
        for (output, file) in &staged {
            match file {
                Some((path, temp)) => {
                    let mut writer = io
                        .new_writer(temp.path())
                        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                    output.write(report, &mut writer)?;
                    writer
                        .flush()
                        .with_context(|| format!("Failed to flush output file: {}", path.display()))?;
                }
                None if *output == Output::SummaryMetric => {}
                None => output.write(report, console)?,
            }
        }
        console.flush().context("Failed to flush console output")?;

        for (output, file) in staged {
            if let Some((path, temp)) = file {
                temp.persist(path)
                    .with_context(|| format!("Failed to move output into place: {}", path.display()))?;
                info!("Wrote {} to {}", output.description(), path.display());
            }
        }
        Ok(())
    }
}

/// Creates an empty temporary file in the directory of `path`.
///
/// The temporary name ends with the destination's file name so that compression is
/// chosen from the same extension.
fn stage(path: &Path) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let suffix = format!("-{name}");
    let mut builder = tempfile::Builder::new();
    builder.prefix(".bsmapstats-").suffix(&suffix);
    // temp files default to owner-only access; outputs get regular file permissions
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    builder
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create output file: {}", path.display()))
}
