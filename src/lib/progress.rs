//! Interval progress logging for long record streams.

use log::info;

/// Default number of records between progress messages.
pub const DEFAULT_INTERVAL: u64 = 1_000_000;

/// Counts records read from one stream and logs every `interval` records.
///
/// # Example
/// ```
/// use bsmapstats_lib::progress::ProgressTracker;
///
/// let mut tracker = ProgressTracker::new("Read records from the excluded input").with_interval(100);
/// for _ in 0..250 {
///     tracker.record(); // logs at 100 and 200
/// }
/// tracker.log_final(); // logs "... 250 (complete)"
/// assert_eq!(tracker.count(), 250);
/// ```
#[derive(Debug)]
pub struct ProgressTracker {
    interval: u64,
    message: String,
    count: u64,
}

impl ProgressTracker {
    /// Creates a tracker that logs `message` followed by the running count.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { interval: DEFAULT_INTERVAL, message: message.into(), count: 0 }
    }

    /// Sets the number of records between messages. Zero is treated as one.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Counts one record, returning `true` if a message was logged.
    pub fn record(&mut self) -> bool {
        self.count += 1;
        if self.count.is_multiple_of(self.interval) {
            info!("{} {}", self.message, self.count);
            true
        } else {
            false
        }
    }

    /// Logs the final count unless the last [`record`](Self::record) call already did.
    pub fn log_final(&self) {
        if self.count > 0 && !self.count.is_multiple_of(self.interval) {
            info!("{} {} (complete)", self.message, self.count);
        }
    }

    /// Number of records counted so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }
}
