//! SAM text records as produced by a bisulfite-aware mapper.
//!
//! - [`record`] parses one SAM line into an [`AlignmentRecord`], validating the tags the
//!   aggregation relies on
//! - [`mate_class`] interprets the flag bits as a [`MateClass`]
//! - [`tags`] names the recognized optional fields

pub mod mate_class;
pub mod record;
pub mod tags;

pub use mate_class::MateClass;
pub use record::AlignmentRecord;
