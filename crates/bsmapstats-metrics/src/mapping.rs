//! Metrics for the `mapping-stats` command.
//!
//! Three kinds of rows are produced:
//! - [`HitCountMetric`]: one row per hit count for a single mate class, carrying the
//!   normalized (per read or per fragment) frequency
//! - [`EditDistanceMetric`]: one row per edit distance, carrying the raw number of
//!   alignment records
//! - [`MappingSummaryMetric`]: a single row with every summary figure and percentage

use serde::{Deserialize, Serialize};

use crate::Metric;

/// Normalized frequency of reads (or fragments) observed with a given hit count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitCountMetric {
    /// Number of equally-best alignment positions reported (NH)
    pub hit_count: u32,
    /// Number of alignment records divided by the per-class divisor for this hit count
    pub frequency: f64,
}

impl HitCountMetric {
    /// Creates a new hit count metric.
    #[must_use]
    pub fn new(hit_count: u32, frequency: f64) -> Self {
        Self { hit_count, frequency }
    }
}

impl Default for HitCountMetric {
    fn default() -> Self {
        Self::new(1, 0.0)
    }
}

impl Metric for HitCountMetric {
    fn metric_name() -> &'static str {
        "hit count"
    }
}

/// Raw number of alignment records observed with a given edit distance.
///
/// Records without an edit distance are reported under the label `unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDistanceMetric {
    /// Edit distance (NM) or `unknown`
    pub edit_distance: String,
    /// Number of alignment records
    pub count: u64,
}

impl EditDistanceMetric {
    /// Creates a new edit distance metric.
    #[must_use]
    pub fn new(edit_distance: impl Into<String>, count: u64) -> Self {
        Self { edit_distance: edit_distance.into(), count }
    }
}

impl Default for EditDistanceMetric {
    fn default() -> Self {
        Self::new("0", 0)
    }
}

impl Metric for EditDistanceMetric {
    fn metric_name() -> &'static str {
        "edit distance"
    }
}

/// Summary of uniquely and multiply mapped reads for one run.
///
/// Figures are rounded to two decimal places. Percentages are empty when no total
/// read count was supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingSummaryMetric {
    /// Number of alignment records aggregated across both inputs
    pub total_mappings: u64,
    /// Externally supplied number of sequenced reads
    pub total_reads_input: Option<u64>,
    /// Fragments with both mates mapped to exactly one position
    pub paired_unique: f64,
    /// `paired_unique` as a percentage of the read total
    pub paired_unique_pct: Option<f64>,
    /// Fragments with both mates mapped to multiple positions
    pub paired_multiple: f64,
    /// `paired_multiple` as a percentage of the read total
    pub paired_multiple_pct: Option<f64>,
    /// Mates mapped to exactly one position whose partner did not map
    pub mate_unique: f64,
    /// `mate_unique` as a percentage of the read total
    pub mate_unique_pct: Option<f64>,
    /// Mates mapped to multiple positions whose partner did not map
    pub mate_multiple: f64,
    /// `mate_multiple` as a percentage of the read total
    pub mate_multiple_pct: Option<f64>,
    /// Single-end reads mapped to exactly one position
    pub single_unique: f64,
    /// `single_unique` as a percentage of the read total
    pub single_unique_pct: Option<f64>,
    /// Single-end reads mapped to multiple positions
    pub single_multiple: f64,
    /// `single_multiple` as a percentage of the read total
    pub single_multiple_pct: Option<f64>,
    /// Sum of all unique and multiple figures
    pub total_reads: f64,
    /// `total_reads` as a percentage of the read total
    pub total_reads_pct: Option<f64>,
    /// Number of mapped sequenced fragments (paired figures count twice)
    pub total_fragments: f64,
    /// `total_fragments` as a percentage of twice the read total
    pub total_fragments_pct: Option<f64>,
}

impl Metric for MappingSummaryMetric {
    fn metric_name() -> &'static str {
        "mapping summary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_count_metric_new() {
        let metric = HitCountMetric::new(3, 1.5);
        assert_eq!(metric.hit_count, 3);
        assert!((metric.frequency - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_edit_distance_metric_new() {
        let metric = EditDistanceMetric::new("unknown", 7);
        assert_eq!(metric.edit_distance, "unknown");
        assert_eq!(metric.count, 7);
    }

    #[test]
    fn test_summary_default_has_no_percentages() {
        let metric = MappingSummaryMetric::default();
        assert_eq!(metric.total_mappings, 0);
        assert!(metric.total_reads_input.is_none());
        assert!(metric.total_fragments_pct.is_none());
    }

    #[test]
    fn test_metric_trait_impl() {
        assert_eq!(HitCountMetric::metric_name(), "hit count");
        assert_eq!(EditDistanceMetric::metric_name(), "edit distance");
        assert_eq!(MappingSummaryMetric::metric_name(), "mapping summary");
    }
}
