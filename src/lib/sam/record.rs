//! Parsing of SAM text lines into the fields needed for mapping statistics.
//!
//! Only the query name, the flag and the tags listed in [`RecognizedTag`] are kept; the
//! other mandatory columns are checked for presence and dropped.

use noodles::sam::alignment::record::Flags;

use super::mate_class::MateClass;
use super::tags::RecognizedTag;
use crate::errors::{MappingStatsError, Result};

/// Prefix of SAM header lines.
pub const HEADER_SIGIL: char = '@';

/// Number of mandatory tab-separated columns in a SAM record.
pub const MANDATORY_FIELDS: usize = 11;

/// The parts of an alignment record used for aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    query_name: String,
    flags: Flags,
    edit_distance: Option<u32>,
    hit_count: u32,
    bisulfite_mismatches: Option<u32>,
    bisulfite_context: String,
}

impl AlignmentRecord {
    /// Parses one line of SAM text.
    ///
    /// Returns `Ok(None)` for header lines and blank lines.
    ///
    /// # Errors
    ///
    /// Returns [`MappingStatsError::Parse`] for malformed lines and
    /// [`MappingStatsError::ConstraintViolation`] when the record carries a realigned or
    /// split-read marker, or lacks the bisulfite context or hit count tag.
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        let line = line.trim_end_matches(['\n', '\r']);
        if line.is_empty() || line.starts_with(HEADER_SIGIL) {
            return Ok(None);
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < MANDATORY_FIELDS {
            return Err(MappingStatsError::parse(format!(
                "expected at least {MANDATORY_FIELDS} tab-separated fields, found {}",
                fields.len()
            )));
        }

        let query_name = fields[0];
        let flags = fields[1].parse::<u16>().map(Flags::from_bits_retain).map_err(|_| {
            MappingStatsError::parse(format!("invalid flag '{}' for record '{query_name}'", fields[1]))
        })?;

        let mut tags = TagValues::default();
        for field in &fields[MANDATORY_FIELDS..] {
            tags.observe(field, query_name)?;
        }

        tags.into_record(query_name, flags).map(Some)
    }

    /// The query (read) name.
    #[must_use]
    pub fn query_name(&self) -> &str {
        &self.query_name
    }

    /// The flag bits.
    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// The edit distance, if the record carried one.
    #[must_use]
    pub fn edit_distance(&self) -> Option<u32> {
        self.edit_distance
    }

    /// Number of equally-best positions reported for the read (always >= 1).
    #[must_use]
    pub fn hit_count(&self) -> u32 {
        self.hit_count
    }

    /// Number of bisulfite-induced mismatches, if reported.
    #[must_use]
    pub fn bisulfite_mismatches(&self) -> Option<u32> {
        self.bisulfite_mismatches
    }

    /// The bisulfite conversion context marker.
    #[must_use]
    pub fn bisulfite_context(&self) -> &str {
        &self.bisulfite_context
    }

    /// Classifies the record by its flag bits.
    ///
    /// # Errors
    ///
    /// See [`MateClass::from_flags`].
    pub fn mate_class(&self) -> Result<MateClass> {
        MateClass::from_flags(self.flags, &self.query_name)
    }
}

/// Values of the recognized tags collected in a single pass over a record's tag fields.
#[derive(Debug, Default)]
struct TagValues {
    edit_distance: Option<u32>,
    hit_count: Option<u32>,
    bisulfite_mismatches: Option<u32>,
    bisulfite_context: Option<String>,
    split_read_marker_a: bool,
    split_read_marker_b: bool,
    realigned_marker: bool,
}

impl TagValues {
    fn observe(&mut self, field: &str, query_name: &str) -> Result<()> {
        let (name, value_type, value) = split_tag_field(field).ok_or_else(|| {
            MappingStatsError::parse(format!(
                "tag field '{field}' of record '{query_name}' is not of the form NAME:TYPE:VALUE"
            ))
        })?;

        let Some(tag) = RecognizedTag::from_name(name) else {
            return Ok(());
        };

        match tag {
            RecognizedTag::EditDistance => {
                self.edit_distance = Some(parse_integer(tag, value_type, value, query_name)?);
            }
            RecognizedTag::HitCount => {
                let hit_count = parse_integer(tag, value_type, value, query_name)?;
                if hit_count == 0 {
                    return Err(MappingStatsError::parse(format!(
                        "hit count of record '{query_name}' must be at least 1"
                    )));
                }
                self.hit_count = Some(hit_count);
            }
            RecognizedTag::BisulfiteMismatches => {
                self.bisulfite_mismatches = Some(parse_integer(tag, value_type, value, query_name)?);
            }
            RecognizedTag::BisulfiteContext => self.bisulfite_context = Some(value.to_string()),
            RecognizedTag::SplitReadMarkerA => self.split_read_marker_a = true,
            RecognizedTag::SplitReadMarkerB => self.split_read_marker_b = true,
            RecognizedTag::RealignedMarker => self.realigned_marker = true,
        }
        Ok(())
    }

    fn into_record(self, query_name: &str, flags: Flags) -> Result<AlignmentRecord> {
        if self.realigned_marker {
            return Err(MappingStatsError::constraint(
                query_name,
                format!("realigned marker tag {} must be absent", tag_name(RecognizedTag::RealignedMarker)),
            ));
        }
        if self.split_read_marker_a || self.split_read_marker_b {
            let tag = if self.split_read_marker_a {
                RecognizedTag::SplitReadMarkerA
            } else {
                RecognizedTag::SplitReadMarkerB
            };
            return Err(MappingStatsError::constraint(
                query_name,
                format!("split-read marker tag {} must be absent", tag_name(tag)),
            ));
        }
        let Some(bisulfite_context) = self.bisulfite_context else {
            return Err(MappingStatsError::constraint(
                query_name,
                format!("bisulfite context tag {} is missing", tag_name(RecognizedTag::BisulfiteContext)),
            ));
        };
        let Some(hit_count) = self.hit_count else {
            return Err(MappingStatsError::constraint(
                query_name,
                format!("hit count tag {} is missing", tag_name(RecognizedTag::HitCount)),
            ));
        };

        Ok(AlignmentRecord {
            query_name: query_name.to_string(),
            flags,
            edit_distance: self.edit_distance,
            hit_count,
            bisulfite_mismatches: self.bisulfite_mismatches,
            bisulfite_context,
        })
    }
}

/// Splits `NAME:TYPE:VALUE` into its parts.
fn split_tag_field(field: &str) -> Option<([u8; 2], u8, &str)> {
    let bytes = field.as_bytes();
    if bytes.len() < 5 || bytes[2] != b':' || bytes[4] != b':' {
        return None;
    }
    Some(([bytes[0], bytes[1]], bytes[3], &field[5..]))
}

fn parse_integer(tag: RecognizedTag, value_type: u8, value: &str, query_name: &str) -> Result<u32> {
    if value_type != b'i' {
        return Err(MappingStatsError::parse(format!(
            "tag {} of record '{query_name}' must have integer type 'i', found '{}'",
            tag_name(tag),
            char::from(value_type)
        )));
    }
    value.parse::<u32>().map_err(|_| {
        MappingStatsError::parse(format!(
            "tag {} of record '{query_name}' has invalid value '{value}'",
            tag_name(tag)
        ))
    })
}

fn tag_name(tag: RecognizedTag) -> String {
    let [a, b]: [u8; 2] = tag.tag().into();
    format!("{}{}", char::from(a), char::from(b))
}
