//! Integration tests for the bsmapstats binary.
//!
//! These tests run the built executable end to end on small SAM files and check the
//! files and console output it produces.

mod helpers;
mod test_error_paths;
mod test_mapping_stats_command;
mod test_streaming_input;
