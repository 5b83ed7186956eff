//! Helper utilities for integration tests.

pub mod sam_generator;

pub use sam_generator::*;
