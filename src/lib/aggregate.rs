//! Driving alignment streams through parsing, classification and accumulation.

use anyhow::{Context, Result};
use log::info;

use crate::accumulator::FrequencyAccumulator;
use crate::progress::ProgressTracker;
use crate::sam::AlignmentRecord;
use crate::source::LineSource;

/// Feeds every line of one stream into `acc`, returning the number of records added.
///
/// Header and blank lines are skipped. The first invalid record aborts the stream; the
/// returned error names the stream and the 1-based line number, and the underlying
/// [`MappingStatsError`](crate::errors::MappingStatsError) can be recovered with
/// `downcast_ref`.
///
/// # Errors
///
/// Returns an error if a line cannot be read or a record is invalid.
pub fn aggregate_lines<I>(lines: I, stream: &str, acc: &mut FrequencyAccumulator) -> Result<u64>
where
    I: IntoIterator<Item = std::io::Result<String>>,
{
    let mut progress = ProgressTracker::new(format!("Read records from the {stream} input"));
    for (index, line) in lines.into_iter().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("Failed to read line {line_number} of the {stream} input"))?;
        let Some(record) = AlignmentRecord::parse_line(&line)
            .with_context(|| format!("Invalid record at line {line_number} of the {stream} input"))?
        else {
            continue;
        };
        let class = record
            .mate_class()
            .with_context(|| format!("Invalid record at line {line_number} of the {stream} input"))?;
        acc.add(&record, class);
        progress.record();
    }
    progress.log_final();
    Ok(progress.count())
}

/// Reads a whole source into `acc`, then closes it.
///
/// # Errors
///
/// Returns an error if any record is invalid or the source fails.
pub fn aggregate_source(mut source: LineSource, stream: &str, acc: &mut FrequencyAccumulator) -> Result<u64> {
    info!("Reading the {stream} input from {}", source.path().display());
    let records = aggregate_lines(source.lines(), stream, acc)?;
    source.finish()?;
    info!("Read {records} records from the {stream} input");
    Ok(records)
}
