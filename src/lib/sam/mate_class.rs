//! Classification of alignment records by how many mates of the template mapped.

use noodles::sam::alignment::record::Flags;
use std::fmt;

use crate::errors::{MappingStatsError, Result};

/// Pairing category of an alignment record.
///
/// Exactly one class applies to every mapped record with consistent flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MateClass {
    /// Paired-end record whose mate also mapped
    PairedBothMapped,
    /// Paired-end record whose mate did not map (or was registered separately)
    MateOnlyOneMapped,
    /// Single-end record
    SingleEnd,
}

impl MateClass {
    /// All classes, in reporting order.
    pub const ALL: [MateClass; 3] = [Self::PairedBothMapped, Self::MateOnlyOneMapped, Self::SingleEnd];

    /// Classifies a record from its flag bits.
    ///
    /// # Errors
    ///
    /// Returns [`MappingStatsError::UnmappedRecord`] if the unmapped bit is set, and
    /// [`MappingStatsError::FlagConsistency`] if the segment bits contradict each other.
    pub fn from_flags(flags: Flags, read_name: &str) -> Result<Self> {
        let inconsistent = |reason: &str| MappingStatsError::FlagConsistency {
            read_name: read_name.to_string(),
            flag: flags.bits(),
            reason: reason.to_string(),
        };

        if flags.is_unmapped() {
            return Err(MappingStatsError::UnmappedRecord {
                read_name: read_name.to_string(),
                flag: flags.bits(),
            });
        }

        if flags.is_segmented() {
            if flags.is_mate_unmapped() {
                return Ok(Self::MateOnlyOneMapped);
            }
            match (flags.is_first_segment(), flags.is_last_segment()) {
                (true, true) => Err(inconsistent("both first and last segment bits are set")),
                (true, false) | (false, true) => Ok(Self::PairedBothMapped),
                (false, false) => {
                    Err(inconsistent("paired record is neither first nor last segment"))
                }
            }
        } else if flags.is_first_segment() || flags.is_last_segment() {
            Err(inconsistent("segment position bit is set on an unpaired record"))
        } else {
            Ok(Self::SingleEnd)
        }
    }

    /// Number of alignment records that one read (or fragment) with `hit_count`
    /// equally-best positions contributes to this class.
    ///
    /// Both mates of a fragment are reported at every position, so a paired fragment
    /// appears `2 * hit_count` times.
    #[must_use]
    pub fn divisor(self, hit_count: u32) -> u64 {
        match self {
            Self::PairedBothMapped => 2 * u64::from(hit_count),
            Self::MateOnlyOneMapped | Self::SingleEnd => u64::from(hit_count),
        }
    }

    /// Short label used in file names and plot panels.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PairedBothMapped => "paired",
            Self::MateOnlyOneMapped => "mate",
            Self::SingleEnd => "single",
        }
    }

    /// Human-readable description used in the summary report.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::PairedBothMapped => "Paired-end, both mates mapped",
            Self::MateOnlyOneMapped => "Paired-end, one mate mapped",
            Self::SingleEnd => "Single-end",
        }
    }
}

impl fmt::Display for MateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
