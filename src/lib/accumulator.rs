//! Frequency aggregation over alignment records.
//!
//! A [`FrequencyAccumulator`] holds every piece of mutable state for one run: a hit-count
//! histogram per [`MateClass`], a shared edit-distance histogram, and the number of
//! alignment records seen. Histograms are plain key-wise sums, so accumulators built
//! from disjoint record sets can be combined with [`FrequencyAccumulator::merge`].

use log::warn;
use std::collections::BTreeMap;
use std::fmt;

use crate::sam::{AlignmentRecord, MateClass};

/// Histogram of hit count to number of alignment records, ascending by hit count.
pub type HitHistogram = BTreeMap<u32, u64>;

/// Histogram of edit distance to number of alignment records.
pub type EditDistanceHistogram = BTreeMap<EditDistanceKey, u64>;

/// Key of the edit-distance histogram.
///
/// Records without an edit distance are counted under [`EditDistanceKey::Unknown`], which
/// sorts after every known distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EditDistanceKey {
    Known(u32),
    Unknown,
}

impl From<Option<u32>> for EditDistanceKey {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}

impl fmt::Display for EditDistanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(distance) => write!(f, "{distance}"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Aggregation state for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyAccumulator {
    paired: HitHistogram,
    mate: HitHistogram,
    single: HitHistogram,
    edit_distances: EditDistanceHistogram,
    total_mappings: u64,
    records_missing_edit_distance: u64,
}

impl FrequencyAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one alignment record that was classified as `class`.
    ///
    /// The first record lacking an edit distance logs a warning; later ones are only
    /// counted.
    pub fn add(&mut self, record: &AlignmentRecord, class: MateClass) {
        *self.histogram_mut(class).entry(record.hit_count()).or_insert(0) += 1;
        *self.edit_distances.entry(record.edit_distance().into()).or_insert(0) += 1;
        self.total_mappings += 1;

        if record.edit_distance().is_none() {
            if self.records_missing_edit_distance == 0 {
                warn!(
                    "Record '{}' has no edit distance (NM) tag; records without one are counted \
                     under the 'unknown' edit distance",
                    record.query_name()
                );
            }
            self.records_missing_edit_distance += 1;
        }
    }

    /// Adds every count from `other` into this accumulator.
    pub fn merge(&mut self, other: &FrequencyAccumulator) {
        for class in MateClass::ALL {
            let target = self.histogram_mut(class);
            for (&hit_count, &count) in other.histogram(class) {
                *target.entry(hit_count).or_insert(0) += count;
            }
        }
        for (&key, &count) in &other.edit_distances {
            *self.edit_distances.entry(key).or_insert(0) += count;
        }
        self.total_mappings += other.total_mappings;
        self.records_missing_edit_distance += other.records_missing_edit_distance;
    }

    /// The hit-count histogram for one class.
    #[must_use]
    pub fn histogram(&self, class: MateClass) -> &HitHistogram {
        match class {
            MateClass::PairedBothMapped => &self.paired,
            MateClass::MateOnlyOneMapped => &self.mate,
            MateClass::SingleEnd => &self.single,
        }
    }

    fn histogram_mut(&mut self, class: MateClass) -> &mut HitHistogram {
        match class {
            MateClass::PairedBothMapped => &mut self.paired,
            MateClass::MateOnlyOneMapped => &mut self.mate,
            MateClass::SingleEnd => &mut self.single,
        }
    }

    /// The shared edit-distance histogram.
    #[must_use]
    pub fn edit_distances(&self) -> &EditDistanceHistogram {
        &self.edit_distances
    }

    /// Number of alignment records added.
    #[must_use]
    pub fn total_mappings(&self) -> u64 {
        self.total_mappings
    }

    /// Number of records added that had no edit distance.
    #[must_use]
    pub fn records_missing_edit_distance(&self) -> u64 {
        self.records_missing_edit_distance
    }

    /// Number of records classified into `class`.
    #[must_use]
    pub fn records_in(&self, class: MateClass) -> u64 {
        self.histogram(class).values().sum()
    }
}
