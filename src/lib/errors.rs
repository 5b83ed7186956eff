//! Custom error types for bsmapstats operations.

use thiserror::Error;

/// Result type alias for bsmapstats operations
pub type Result<T> = std::result::Result<T, MappingStatsError>;

/// Error type for bsmapstats operations.
///
/// Every variant except the parameter and file variants describes a single alignment
/// record that cannot be aggregated; all of them abort the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingStatsError {
    /// The line is not a well-formed SAM record
    #[error("Malformed alignment record: {reason}")]
    Parse {
        /// Explanation of the problem
        reason: String,
    },

    /// The record carries a tag that must be absent, or lacks one that must be present
    #[error("Record '{read_name}' violates bisulfite mapping constraints: {reason}")]
    ConstraintViolation {
        /// Query name of the offending record
        read_name: String,
        /// Explanation of the violated constraint
        reason: String,
    },

    /// The record is unmapped but only mapped records are accepted
    #[error("Record '{read_name}' is unmapped (flag {flag}); only mapped records are accepted")]
    UnmappedRecord {
        /// Query name of the offending record
        read_name: String,
        /// The full flag value
        flag: u16,
    },

    /// The pairing bits of the flag contradict each other
    #[error("Record '{read_name}' has inconsistent pairing flags (flag {flag}): {reason}")]
    FlagConsistency {
        /// Query name of the offending record
        read_name: String,
        /// The full flag value
        flag: u16,
        /// Explanation of the contradiction
        reason: String,
    },

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// File format error
    #[error("Invalid {file_type} file '{path}': {reason}")]
    InvalidFileFormat {
        /// Type of file (e.g., "excluded SAM")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },
}

impl MappingStatsError {
    pub(crate) fn parse(reason: impl Into<String>) -> Self {
        Self::Parse { reason: reason.into() }
    }

    pub(crate) fn constraint(read_name: &str, reason: impl Into<String>) -> Self {
        Self::ConstraintViolation { read_name: read_name.to_string(), reason: reason.into() }
    }
}
