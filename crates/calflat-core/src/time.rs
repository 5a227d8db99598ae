//! Expansion window for recurrence resolution.
//!
//! The window bounds how far a recurrence rule is expanded and which single
//! events make it into the output at all.

use chrono::{DateTime, Duration, Utc};

/// Default window reach into the past, in days (roughly 20 years).
pub const DEFAULT_PAST_DAYS: i64 = 365 * 20;

/// Default window reach into the future, in days (roughly 5 years).
pub const DEFAULT_FUTURE_DAYS: i64 = 365 * 5;

/// The time range that occurrence expansion is bounded to.
///
/// Both ends are inclusive: an event starting exactly at `start` or exactly
/// at `end` is part of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (inclusive).
    pub end: DateTime<Utc>,
}

impl ExpansionWindow {
    /// Creates a new expansion window.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        assert!(start <= end, "ExpansionWindow start must be <= end");
        Self { start, end }
    }

    /// Creates a window reaching `past_days` back and `future_days` forward
    /// from the given reference instant.
    pub fn around(now: DateTime<Utc>, past_days: i64, future_days: i64) -> Self {
        Self::new(
            now - Duration::days(past_days),
            now + Duration::days(future_days),
        )
    }

    /// Creates the default window (about 20 years back, 5 years forward)
    /// around the given instant.
    pub fn default_around(now: DateTime<Utc>) -> Self {
        Self::around(now, DEFAULT_PAST_DAYS, DEFAULT_FUTURE_DAYS)
    }

    /// Checks whether an instant falls within the window, inclusive on both
    /// ends.
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.start <= dt && dt <= self.end
    }

    /// Returns the length of the window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}
