//! Optional SAM tags recognized on bisulfite alignment records.
//!
//! Only the tags listed in [`RecognizedTag`] are interpreted; every other tag on a
//! record is ignored.

use noodles::sam::alignment::record::data::field::Tag;

/// Edit distance to the reference (`NM:i`).
pub const EDIT_DISTANCE: Tag = Tag::new(b'N', b'M');

/// Number of equally-best alignment positions reported for the read (`NH:i`).
pub const HIT_COUNT: Tag = Tag::new(b'N', b'H');

/// Number of bisulfite-induced mismatches (`XM:i`).
pub const BISULFITE_MISMATCHES: Tag = Tag::new(b'X', b'M');

/// Bisulfite conversion context of the alignment (`XB:Z`), e.g. `F1/CT`.
pub const BISULFITE_CONTEXT: Tag = Tag::new(b'X', b'B');

/// First split-read marker (`XX`).
pub const SPLIT_READ_MARKER_A: Tag = Tag::new(b'X', b'X');

/// Second split-read marker (`XY`).
pub const SPLIT_READ_MARKER_B: Tag = Tag::new(b'X', b'Y');

/// Marker set on records produced by a realignment step (`XR`).
pub const REALIGNED_MARKER: Tag = Tag::new(b'X', b'R');

/// The tags whose presence or value affects aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecognizedTag {
    EditDistance,
    HitCount,
    BisulfiteMismatches,
    BisulfiteContext,
    SplitReadMarkerA,
    SplitReadMarkerB,
    RealignedMarker,
}

impl RecognizedTag {
    /// All recognized tags.
    pub const ALL: [RecognizedTag; 7] = [
        Self::EditDistance,
        Self::HitCount,
        Self::BisulfiteMismatches,
        Self::BisulfiteContext,
        Self::SplitReadMarkerA,
        Self::SplitReadMarkerB,
        Self::RealignedMarker,
    ];

    /// Looks up a two-character tag name, returning `None` for tags that are not recognized.
    #[must_use]
    pub fn from_name(name: [u8; 2]) -> Option<Self> {
        Self::ALL.into_iter().find(|recognized| <[u8; 2]>::from(recognized.tag()) == name)
    }

    /// The SAM tag for this entry.
    #[must_use]
    pub fn tag(self) -> Tag {
        match self {
            Self::EditDistance => EDIT_DISTANCE,
            Self::HitCount => HIT_COUNT,
            Self::BisulfiteMismatches => BISULFITE_MISMATCHES,
            Self::BisulfiteContext => BISULFITE_CONTEXT,
            Self::SplitReadMarkerA => SPLIT_READ_MARKER_A,
            Self::SplitReadMarkerB => SPLIT_READ_MARKER_B,
            Self::RealignedMarker => REALIGNED_MARKER,
        }
    }
}
