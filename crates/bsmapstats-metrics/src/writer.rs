//! Writing metric rows as tab-separated values.
//!
//! The header row is derived from the field names of the metric type.

use anyhow::{Context, Result};
use std::io::Write;

use super::Metric;

/// Write metrics as TSV to an already-open sink (a file, standard output, a buffer).
///
/// The sink is flushed but not closed, so several tables may share one sink.
/// No header is written when `metrics` is empty.
///
/// # Errors
/// Returns an error if serialization or writing fails
pub fn write_metrics_to<W: Write, T: Metric>(sink: W, metrics: &[T]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(sink);
    for metric in metrics {
        writer
            .serialize(metric)
            .with_context(|| format!("Failed to write {} metrics", T::metric_name()))?;
    }
    writer.flush().with_context(|| format!("Failed to flush {} metrics", T::metric_name()))?;
    Ok(())
}
