//! Log-line formatting helpers and the end-of-run summary.

use std::time::{Duration, Instant};

use bsmapstats_metrics::{format_count, format_float};
use log::info;

use crate::report::MappingReport;

/// Formats a fraction (0.0-1.0) as a percentage, e.g. `format_percent(0.9543, 2) == "95.43%"`.
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0)
}

/// Formats a duration as e.g. "45s", "2m 15s" or "1h 30m".
///
/// ```
/// use bsmapstats_lib::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (major, minor, major_unit, minor_unit) = match secs {
        0..60 => return format!("{secs}s"),
        60..3600 => (secs / 60, secs % 60, "m", "s"),
        _ => (secs / 3600, (secs % 3600) / 60, "h", "m"),
    };
    if minor == 0 { format!("{major}{major_unit}") } else { format!("{major}{major_unit} {minor}{minor_unit}") }
}

/// Formats a record throughput, falling back to records/min for slow rates.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} records/s", format_count(count));
    }
    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} records/s", format_count(rate as u64))
    } else {
        format!("{:.1} records/min", rate * 60.0)
    }
}

/// Logs the start of a phase on creation and its duration on completion.
///
/// ```no_run
/// use bsmapstats_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Aggregating alignment records");
/// // ... read both streams ...
/// timer.log_completion(10_000);
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    #[must_use]
    pub fn new(operation: &str) -> Self {
        info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Logs the number of records handled, the elapsed time and the rate.
    pub fn log_completion(&self, count: u64) {
        let duration = self.start_time.elapsed();
        info!(
            "{} completed: {} records in {} ({})",
            self.operation,
            format_count(count),
            format_duration(duration),
            format_rate(count, duration)
        );
    }
}

/// Logs a short digest of the report: mappings, reads and how they split across classes.
pub fn log_mapping_summary(report: &MappingReport) {
    info!("Mapping Summary:");
    info!("  Total mappings: {}", format_count(report.total_mappings()));
    info!("  Mapped reads: {}", format_float(report.total_reads()));
    info!("  Mapped fragments: {}", format_float(report.total_fragments()));

    let total_reads = report.total_reads();
    if total_reads > 0.0 {
        for figures in report.classes() {
            let share = (figures.unique + figures.multiple) / total_reads;
            info!("  {}: {}", figures.class.description(), format_percent(share, 2));
        }
    }
    if let Some(pct) = report.total_reads_pct() {
        info!("  Reads mapped of input: {}%", format_float(pct));
    }
}
