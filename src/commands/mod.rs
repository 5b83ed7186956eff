//! CLI command implementations for bsmapstats.
//!
//! - [`mapping_stats`] - summarize unique/multiple mapping of bisulfite alignments
//! - [`common`] - option groups shared between commands

#![allow(
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

pub mod command;
pub mod common;
pub mod mapping_stats;
