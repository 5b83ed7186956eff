//! Hand-off of finished numeric series to an external plotting tool.
//!
//! The aggregator never draws anything itself. It builds one [`PlotPanel`] per series
//! and asks a [`PlotRenderer`] for a single multi-panel artifact. The default renderer
//! runs an embedded R script through `Rscript`. A missing or failing renderer is never
//! fatal: [`render_plot`] logs a warning and returns.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use std::path::Path;
use std::process::Command;
use std::sync::OnceLock;

use crate::accumulator::EditDistanceKey;
use crate::report::MappingReport;
use crate::sam::MateClass;

/// Embedded R script for PDF plot generation (bundled with binary)
const R_SCRIPT: &str = include_str!("../../resources/plot_mapping_stats.R");

/// Cached R availability check (computed once per process)
static R_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// One panel of the plot: a title, axis labels and `(x, y)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
}

/// A collaborator able to draw a set of panels into one file.
pub trait PlotRenderer {
    /// Whether the renderer can be used in this environment.
    fn is_available(&self) -> bool;

    /// Draws every panel into a single artifact at `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact could not be produced.
    fn render(&self, panels: &[PlotPanel], output: &Path, title: &str) -> Result<()>;
}

/// Builds the four panels: hit-count frequencies per class, then edit distances.
///
/// Records without an edit distance are left out of the edit-distance panel.
#[must_use]
pub fn plot_panels(report: &MappingReport) -> Vec<PlotPanel> {
    let mut panels: Vec<PlotPanel> = MateClass::ALL
        .iter()
        .map(|&class| PlotPanel {
            title: class.description().to_string(),
            x_label: "hit count (NH)".to_string(),
            y_label: "frequency".to_string(),
            points: report
                .hit_table(class)
                .iter()
                .map(|row| (f64::from(row.hit_count), row.frequency))
                .collect(),
        })
        .collect();

    panels.push(PlotPanel {
        title: "Edit distance".to_string(),
        x_label: "edit distance (NM)".to_string(),
        y_label: "alignments".to_string(),
        points: report
            .edit_distances()
            .iter()
            .filter_map(|&(key, count)| match key {
                EditDistanceKey::Known(distance) => Some((f64::from(distance), count as f64)),
                EditDistanceKey::Unknown => None,
            })
            .collect(),
    });
    panels
}

/// Renders the report's panels with `renderer`, logging a warning instead of failing.
///
/// Returns `true` if the artifact was produced.
pub fn render_plot(renderer: &dyn PlotRenderer, report: &MappingReport, output: &Path, title: &str) -> bool {
    if !renderer.is_available() {
        warn!("Plotting tool not available. Skipping plot generation.");
        return false;
    }

    match renderer.render(&plot_panels(report), output, title) {
        Ok(()) => {
            info!("Generated plots: {}", output.display());
            true
        }
        Err(e) => {
            warn!("Failed to generate plots: {e:#}. Continuing without plots.");
            false
        }
    }
}

/// Renders plots by running an embedded R script with `Rscript`.
///
/// Requires R with the `ggplot2` package.
#[derive(Debug, Clone, Default)]
pub struct RscriptPlotter;

/// One row of the panel file passed to the R script.
#[derive(Serialize)]
struct PanelRow<'a> {
    panel: usize,
    title: &'a str,
    x_label: &'a str,
    y_label: &'a str,
}

/// One row of the long-format points file passed to the R script.
#[derive(Serialize)]
struct PointRow {
    panel: usize,
    x: f64,
    y: f64,
}

impl PlotRenderer for RscriptPlotter {
    fn is_available(&self) -> bool {
        *R_AVAILABLE.get_or_init(|| {
            Command::new("Rscript")
                .args(["-e", "stopifnot(require(ggplot2))"])
                .output()
                .map(|output| output.status.success())
                .unwrap_or(false)
        })
    }

    fn render(&self, panels: &[PlotPanel], output: &Path, title: &str) -> Result<()> {
        let temp_dir = std::env::temp_dir();
        let pid = std::process::id();
        let script_path = temp_dir.join(format!("bsmapstats_{pid}_plot.R"));
        let panels_path = temp_dir.join(format!("bsmapstats_{pid}_panels.tsv"));
        let points_path = temp_dir.join(format!("bsmapstats_{pid}_points.tsv"));

        std::fs::write(&script_path, R_SCRIPT).context("Failed to write embedded R script to temp file")?;
        write_series(&panels_path, &points_path, panels)?;

        info!("Executing R script to generate plots...");
        let result = Command::new("Rscript")
            .arg(&script_path)
            .arg(&panels_path)
            .arg(&points_path)
            .arg(output)
            .arg(title)
            .output()
            .context("Failed to execute Rscript command");

        // Clean up temp files (ignore errors)
        let _ = std::fs::remove_file(&script_path);
        let _ = std::fs::remove_file(&panels_path);
        let _ = std::fs::remove_file(&points_path);

        let result = result?;
        if result.status.success() {
            Ok(())
        } else {
            anyhow::bail!(
                "R script execution failed with exit code {:?}. Error: {}",
                result.status.code(),
                String::from_utf8_lossy(&result.stderr)
            )
        }
    }
}

/// Writes the panel descriptions and their points as two TSV files.
///
/// Both files always start with a header row, even when there are no points.
fn write_series(panels_path: &Path, points_path: &Path, panels: &[PlotPanel]) -> Result<()> {
    let mut panel_writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(panels_path)
        .with_context(|| format!("Failed to create plot panel file: {}", panels_path.display()))?;
    let mut point_writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(points_path)
        .with_context(|| format!("Failed to create plot points file: {}", points_path.display()))?;
    point_writer.write_record(["panel", "x", "y"])?;

    for (index, panel) in panels.iter().enumerate() {
        let panel_number = index + 1;
        panel_writer.serialize(PanelRow {
            panel: panel_number,
            title: &panel.title,
            x_label: &panel.x_label,
            y_label: &panel.y_label,
        })?;
        for &(x, y) in &panel.points {
            point_writer.serialize(PointRow { panel: panel_number, x, y })?;
        }
    }
    panel_writer.flush()?;
    point_writer.flush()?;
    Ok(())
}
