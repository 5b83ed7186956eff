#![deny(unsafe_code)]

//! Structured metric types and TSV writers for bsmapstats.
//!
//! This crate provides:
//! - [`Metric`] trait for serializable metric rows
//! - [`mapping`] module with the hit-count, edit-distance and summary rows
//! - [`writer`] module for TSV output to files or arbitrary sinks

pub mod mapping;
pub mod writer;

use serde::{Deserialize, Serialize};

/// Number of decimal places used for reported figures and percentages.
pub const FLOAT_PRECISION: usize = 2;

/// Formats a float value with the standard precision for reported figures.
///
/// # Example
/// ```
/// use bsmapstats_metrics::format_float;
/// assert_eq!(format_float(0.5), "0.50");
/// assert_eq!(format_float(12.345_6), "12.35");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    format!("{value:.FLOAT_PRECISION$}")
}

/// Rounds a value to [`FLOAT_PRECISION`] decimal places.
///
/// # Example
/// ```
/// use bsmapstats_metrics::round_to_precision;
/// assert!((round_to_precision(1.0 / 3.0) - 0.33).abs() < f64::EPSILON);
/// assert!((round_to_precision(2.675_1) - 2.68).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn round_to_precision(value: f64) -> f64 {
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap, reason = "precision is tiny")]
    let scale = 10_f64.powi(FLOAT_PRECISION as i32);
    (value * scale).round() / scale
}

/// Formats a count with thousands separators.
///
/// # Examples
///
/// ```
/// use bsmapstats_metrics::format_count;
///
/// assert_eq!(format_count(1234567), "1,234,567");
/// assert_eq!(format_count(123), "123");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// A metric type that can be serialized to TSV files.
pub trait Metric: Serialize + for<'de> Deserialize<'de> + Clone + Default {
    /// Human-readable name for this metric type.
    ///
    /// Used in error messages and logging when writing metrics files.
    fn metric_name() -> &'static str;
}

pub use mapping::{EditDistanceMetric, HitCountMetric, MappingSummaryMetric};
pub use writer::write_metrics_to;
