//! The flat output record and its final ordering pass.
//!
//! [`OutputRecord`] is the projection of one resolved event occurrence into
//! the fixed field set the CSV writer emits. Field order in the struct is
//! the column order on the wire; the serde derive preserves it.

use std::collections::HashSet;

use serde::Serialize;

/// One row of the tabular output.
///
/// Created once by the projector, consumed once by the writer, never
/// mutated. Absent text fields are empty strings, not nulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    /// Start date in the reference timezone, `YYYY-MM-DD`.
    pub start_local_date: String,
    /// Start time in the reference timezone, `HH:MM` (24-hour).
    pub start_local_time: String,
    /// End date in the reference timezone, `YYYY-MM-DD`.
    pub end_local_date: String,
    /// End time in the reference timezone, `HH:MM` (24-hour).
    pub end_local_time: String,
    /// Event summary (title).
    pub summary: String,
    /// Best-effort conference link, empty when none was found.
    pub conference_link: String,
    /// Organizer display name, empty when the organizer is a bare address.
    pub organizer_name: String,
    /// Organizer address with any `mailto:` prefix stripped.
    pub organizer_email: String,
    /// Attendees rendered `Name <addr>` or bare address, joined with `"; "`.
    pub attendees: String,
    /// Description with metadata blocks stripped and newlines flattened.
    pub description_plain: String,
    /// Event UID as given by the feed.
    pub uid: String,
    /// True for occurrences produced by recurrence expansion.
    pub is_recurring_instance: bool,
}

impl OutputRecord {
    /// The dedup key: identity plus local start.
    ///
    /// Feeds sometimes carry both a literal single event and an expanded
    /// occurrence for the same logical event; the key collapses them.
    fn dedup_key(&self) -> (String, String, String) {
        (
            self.uid.clone(),
            self.start_local_date.clone(),
            self.start_local_time.clone(),
        )
    }
}

/// Sorts records chronologically and drops duplicates.
///
/// Sorting is lexicographic on `(start_local_date, start_local_time)`, which
/// is equivalent to chronological order for the fixed-width formats used.
/// Duplicates by `(uid, start date, start time)` keep the first record in
/// sorted order. Running this twice yields the same output.
pub fn sort_and_dedup(mut records: Vec<OutputRecord>) -> Vec<OutputRecord> {
    records.sort_by(|a, b| {
        (&a.start_local_date, &a.start_local_time).cmp(&(&b.start_local_date, &b.start_local_time))
    });

    let mut seen = HashSet::new();
    records.retain(|record| seen.insert(record.dedup_key()));
    records
}
