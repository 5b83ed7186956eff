//! Derivation of unique and multiple read counts from finished histograms.
//!
//! Alignment records are converted into read (or fragment) counts by dividing the
//! number of records seen at each hit count by the number of records one read produces
//! at that hit count (see [`MateClass::divisor`]). The results are real valued: a read
//! reported at three positions of which only two survived upstream filtering still
//! contributes two thirds of a read.

use bsmapstats_metrics::{EditDistanceMetric, HitCountMetric, MappingSummaryMetric, round_to_precision};

use crate::accumulator::{EditDistanceKey, FrequencyAccumulator, HitHistogram};
use crate::sam::MateClass;

/// Unique and multiple figures for one mate class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassFigures {
    /// The class these figures describe
    pub class: MateClass,
    /// Reads (or fragments) with exactly one reported position
    pub unique: f64,
    /// `unique` as a percentage of the read total
    pub unique_pct: Option<f64>,
    /// Reads (or fragments) with more than one reported position
    pub multiple: f64,
    /// `multiple` as a percentage of the read total
    pub multiple_pct: Option<f64>,
}

/// Final figures for one run. Immutable once computed.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingReport {
    total_mappings: u64,
    total_reads_input: Option<u64>,
    classes: [ClassFigures; 3],
    total_reads: f64,
    total_reads_pct: Option<f64>,
    total_fragments: f64,
    total_fragments_pct: Option<f64>,
    hit_tables: [Vec<HitCountMetric>; 3],
    edit_distances: Vec<(EditDistanceKey, u64)>,
}

impl MappingReport {
    /// Derives the report from a finished accumulator.
    ///
    /// `total_reads_input` is the number of sequenced reads; percentages are only
    /// computed when it is present and non-zero. Figures and percentages are rounded to
    /// two decimal places, percentages being computed before rounding.
    #[must_use]
    pub fn compute(acc: &FrequencyAccumulator, total_reads_input: Option<u64>) -> Self {
        let denominator = total_reads_input.filter(|&r| r > 0).map(|r| r as f64);
        let percent_of = |value: f64, scale: f64| {
            denominator.map(|r| round_to_precision(100.0 * value / (scale * r)))
        };

        let raw: [(f64, f64); 3] = MateClass::ALL.map(|class| unique_and_multiple(class, acc.histogram(class)));
        let [(paired_unique, paired_multiple), (mate_unique, mate_multiple), (single_unique, single_multiple)] =
            raw;

        let total_reads: f64 = raw.iter().map(|(unique, multiple)| unique + multiple).sum();
        let total_fragments = 2.0 * (paired_unique + paired_multiple)
            + mate_unique
            + mate_multiple
            + single_unique
            + single_multiple;

        let classes = [0, 1, 2].map(|i| {
            let (unique, multiple) = raw[i];
            ClassFigures {
                class: MateClass::ALL[i],
                unique: round_to_precision(unique),
                unique_pct: percent_of(unique, 1.0),
                multiple: round_to_precision(multiple),
                multiple_pct: percent_of(multiple, 1.0),
            }
        });

        let hit_tables = MateClass::ALL.map(|class| normalized_table(class, acc.histogram(class)));
        let edit_distances = acc.edit_distances().iter().map(|(&key, &count)| (key, count)).collect();

        Self {
            total_mappings: acc.total_mappings(),
            total_reads_input,
            classes,
            total_reads: round_to_precision(total_reads),
            total_reads_pct: percent_of(total_reads, 1.0),
            total_fragments: round_to_precision(total_fragments),
            total_fragments_pct: percent_of(total_fragments, 2.0),
            hit_tables,
            edit_distances,
        }
    }

    /// Number of alignment records aggregated.
    #[must_use]
    pub fn total_mappings(&self) -> u64 {
        self.total_mappings
    }

    /// The externally supplied read total, if any.
    #[must_use]
    pub fn total_reads_input(&self) -> Option<u64> {
        self.total_reads_input
    }

    /// Figures for one class.
    #[must_use]
    pub fn class(&self, class: MateClass) -> &ClassFigures {
        &self.classes[class_index(class)]
    }

    /// Figures for every class, in reporting order.
    #[must_use]
    pub fn classes(&self) -> &[ClassFigures; 3] {
        &self.classes
    }

    /// Sum of unique and multiple figures over all classes.
    #[must_use]
    pub fn total_reads(&self) -> f64 {
        self.total_reads
    }

    /// `total_reads` as a percentage of the read total.
    #[must_use]
    pub fn total_reads_pct(&self) -> Option<f64> {
        self.total_reads_pct
    }

    /// Number of mapped sequenced fragments; paired figures count both mates.
    #[must_use]
    pub fn total_fragments(&self) -> f64 {
        self.total_fragments
    }

    /// `total_fragments` as a percentage of twice the read total.
    #[must_use]
    pub fn total_fragments_pct(&self) -> Option<f64> {
        self.total_fragments_pct
    }

    /// Ascending `(hit count, normalized frequency)` rows for one class.
    ///
    /// The frequency at hit count 1 equals the class's unique figure before rounding.
    #[must_use]
    pub fn hit_table(&self, class: MateClass) -> &[HitCountMetric] {
        &self.hit_tables[class_index(class)]
    }

    /// Ascending raw edit-distance counts.
    #[must_use]
    pub fn edit_distances(&self) -> &[(EditDistanceKey, u64)] {
        &self.edit_distances
    }

    /// Edit-distance counts as metric rows.
    #[must_use]
    pub fn edit_distance_table(&self) -> Vec<EditDistanceMetric> {
        self.edit_distances.iter().map(|(key, count)| EditDistanceMetric::new(key.to_string(), *count)).collect()
    }

    /// The report as a single summary metric row.
    #[must_use]
    pub fn to_summary_metric(&self) -> MappingSummaryMetric {
        let [paired, mate, single] = self.classes;
        MappingSummaryMetric {
            total_mappings: self.total_mappings,
            total_reads_input: self.total_reads_input,
            paired_unique: paired.unique,
            paired_unique_pct: paired.unique_pct,
            paired_multiple: paired.multiple,
            paired_multiple_pct: paired.multiple_pct,
            mate_unique: mate.unique,
            mate_unique_pct: mate.unique_pct,
            mate_multiple: mate.multiple,
            mate_multiple_pct: mate.multiple_pct,
            single_unique: single.unique,
            single_unique_pct: single.unique_pct,
            single_multiple: single.multiple,
            single_multiple_pct: single.multiple_pct,
            total_reads: self.total_reads,
            total_reads_pct: self.total_reads_pct,
            total_fragments: self.total_fragments,
            total_fragments_pct: self.total_fragments_pct,
        }
    }
}

fn class_index(class: MateClass) -> usize {
    match class {
        MateClass::PairedBothMapped => 0,
        MateClass::MateOnlyOneMapped => 1,
        MateClass::SingleEnd => 2,
    }
}

/// Number of reads contributed by `count` records at `hit_count`.
fn normalize(class: MateClass, hit_count: u32, count: u64) -> f64 {
    count as f64 / class.divisor(hit_count) as f64
}

/// Unrounded `(unique, multiple)` figures for one class.
fn unique_and_multiple(class: MateClass, histogram: &HitHistogram) -> (f64, f64) {
    let unique = histogram.get(&1).map_or(0.0, |&count| normalize(class, 1, count));
    let multiple = histogram
        .iter()
        .filter(|&(&hit_count, _)| hit_count != 1)
        .map(|(&hit_count, &count)| normalize(class, hit_count, count))
        .sum();
    (unique, multiple)
}

fn normalized_table(class: MateClass, histogram: &HitHistogram) -> Vec<HitCountMetric> {
    histogram
        .iter()
        .map(|(&hit_count, &count)| HitCountMetric::new(hit_count, normalize(class, hit_count, count)))
        .collect()
}
