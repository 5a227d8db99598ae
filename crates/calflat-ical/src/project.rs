//! Record projection.
//!
//! Turns one [`ResolvedOccurrence`] into the flat [`OutputRecord`] the CSV
//! writer emits. All derivations are deterministic functions of the
//! occurrence and the configured reference timezone.

use calflat_core::{clean_description, contact, ConferenceFinder, OutputRecord};
use chrono_tz::Tz;

use crate::component::EventSource;
use crate::expand::ResolvedOccurrence;

/// Projects a resolved occurrence into an output record.
///
/// Start and end instants are localized into the reference zone and split
/// into `YYYY-MM-DD` / `HH:MM` fields. The conference link prefers the
/// vendor extension property verbatim, falling back to a first-match scan
/// over description and location text.
pub fn project<E: EventSource>(
    occurrence: &ResolvedOccurrence<'_, E>,
    reference: Tz,
    finder: &ConferenceFinder,
) -> OutputRecord {
    let source = occurrence.source;
    let start_local = occurrence.start.with_timezone(&reference);
    let end_local = occurrence.end.with_timezone(&reference);

    let description = source.description().unwrap_or_default();
    let conference_link = match source.conference() {
        Some(link) => link.to_string(),
        None => {
            let text = format!("{} {}", description, source.location().unwrap_or_default());
            finder.find_first(&text).unwrap_or_default()
        }
    };

    let (organizer_name, organizer_email) = match source.organizer() {
        Some(organizer) => (
            organizer.name().unwrap_or_default().to_string(),
            organizer.address().to_string(),
        ),
        None => (String::new(), String::new()),
    };

    OutputRecord {
        start_local_date: start_local.format("%Y-%m-%d").to_string(),
        start_local_time: start_local.format("%H:%M").to_string(),
        end_local_date: end_local.format("%Y-%m-%d").to_string(),
        end_local_time: end_local.format("%H:%M").to_string(),
        summary: source.summary().unwrap_or_default().to_string(),
        conference_link,
        organizer_name,
        organizer_email,
        attendees: contact::join_attendees(&source.attendees()),
        description_plain: clean_description(description),
        uid: source.uid().unwrap_or_default().to_string(),
        is_recurring_instance: occurrence.recurring,
    }
}
