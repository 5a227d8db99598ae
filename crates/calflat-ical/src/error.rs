//! Error types for calendar conversion.
//!
//! The split mirrors the run policy: [`ConvertError`] is fatal and aborts
//! the run with no output written, while [`ExpandError`] is scoped to one
//! master event — the caller logs it and moves on to the remaining events.

use thiserror::Error;

/// Result type for whole-calendar conversion.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// A fatal conversion error: the input is not usable as a calendar.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input could not be parsed as an iCalendar document.
    #[error("failed to parse calendar: {0}")]
    Calendar(String),
}

/// A per-master expansion failure.
///
/// Surfaced as a diagnostic on the owning master, which is then skipped;
/// it never aborts the run.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// The recurrence rule failed to parse even after sanitization.
    #[error("failed to parse RRULE: {0}")]
    Rule(String),
}
