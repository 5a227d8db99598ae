//! Occurrence expansion.
//!
//! For each recurring master: sanitize the rule, enumerate occurrence
//! instants inside the window, drop excluded instants, and substitute
//! override instances where one is pinned to exactly that instant. Single
//! events only get the window check.
//!
//! An excluded instant suppresses any override pinned to it: EXDATE wins.
//! An override pinned to an instant the rule never produces is silently
//! never applied — upstream clock drift makes these common enough that
//! reporting them would be noise.

use std::collections::HashSet;

use calflat_core::ExpansionWindow;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::classify::Classified;
use crate::component::EventSource;
use crate::error::ExpandError;
use crate::sanitize::sanitize_rrule;

/// Safety cap on occurrences per master, the `rrule` crate's iteration
/// limit. The window is the real bound; hitting this cap is logged.
const MAX_OCCURRENCES: u16 = u16::MAX;

/// One concrete event instance, resolved to absolute instants.
///
/// `source` supplies the descriptive fields: the master for unmodified
/// occurrences, the override instance where one was substituted.
#[derive(Debug)]
pub struct ResolvedOccurrence<'a, E> {
    /// Absolute start instant.
    pub start: DateTime<Utc>,
    /// Absolute end instant.
    pub end: DateTime<Utc>,
    /// The component supplying descriptive fields.
    pub source: &'a E,
    /// True when this instance was produced by recurrence expansion.
    pub recurring: bool,
}

/// Expands one classified calendar into concrete occurrences.
pub fn expand<'a, E: EventSource>(
    classified: &'a Classified<E>,
    window: ExpansionWindow,
    reference: Tz,
) -> Vec<ResolvedOccurrence<'a, E>> {
    let mut occurrences = Vec::new();

    for single in &classified.singles {
        let Some(stamp) = single.start() else { continue };
        let start = stamp.resolve(reference);
        if window.contains(start) {
            occurrences.push(ResolvedOccurrence {
                start,
                end: own_end(single, start, reference),
                source: single,
                recurring: false,
            });
        }
    }

    for (uid, master) in &classified.masters {
        let Some(start_stamp) = master.start() else { continue };
        let Some(rule) = master.rrule() else { continue };

        let start = start_stamp.resolve(reference);
        let zone = start_stamp.zone_hint(reference);
        let rule = sanitize_rrule(rule, zone);

        let instants = match expand_rule(&rule, start, zone, window) {
            Ok(instants) => instants,
            Err(e) => {
                warn!(
                    uid = %uid,
                    summary = master.summary().unwrap_or("(none)"),
                    error = %e,
                    "Skipping master with unparseable RRULE"
                );
                continue;
            }
        };
        debug!(uid = %uid, count = instants.len(), "Expanded recurring master");

        let duration = master_duration(master, start, reference);
        let excluded: HashSet<DateTime<Utc>> = master
            .exdates()
            .iter()
            .map(|stamp| stamp.resolve(reference))
            .collect();

        for instant in instants {
            if excluded.contains(&instant) {
                continue;
            }

            match classified.override_at(uid, instant) {
                Some(instance) => {
                    // The override supplies its own start and end; nothing
                    // is inherited from the master.
                    let Some(stamp) = instance.start() else { continue };
                    let start = stamp.resolve(reference);
                    occurrences.push(ResolvedOccurrence {
                        start,
                        end: own_end(instance, start, reference),
                        source: instance,
                        recurring: true,
                    });
                }
                None => occurrences.push(ResolvedOccurrence {
                    start: instant,
                    end: instant + duration,
                    source: master,
                    recurring: true,
                }),
            }
        }
    }

    occurrences
}

/// Enumerates a rule's occurrence instants within the window, ascending.
///
/// Expansion runs in the master's own timezone: a rule pinned to a
/// DST-observing zone repeats at a fixed wall-clock time, so the UTC
/// instant of its occurrences shifts across a transition.
fn expand_rule(
    rule: &str,
    dtstart: DateTime<Utc>,
    zone: Tz,
    window: ExpansionWindow,
) -> Result<Vec<DateTime<Utc>>, ExpandError> {
    let set_text = format!(
        "DTSTART;TZID={}:{}\nRRULE:{}",
        zone.name(),
        dtstart.with_timezone(&zone).format("%Y%m%dT%H%M%S"),
        rule
    );
    let set = set_text
        .parse::<rrule::RRuleSet>()
        .map_err(|e| ExpandError::Rule(e.to_string()))?;

    // Query bounds are widened by a second; the window check below owns the
    // inclusive-both-ends semantics.
    let tz = rrule::Tz::Tz(zone);
    let result = set
        .after((window.start - Duration::seconds(1)).with_timezone(&tz))
        .before((window.end + Duration::seconds(1)).with_timezone(&tz))
        .all(MAX_OCCURRENCES);

    if result.limited {
        warn!(rule = %rule, "Occurrence cap reached, expansion truncated");
    }

    Ok(result
        .dates
        .into_iter()
        .map(|dt| dt.with_timezone(&Utc))
        .filter(|dt| window.contains(*dt))
        .collect())
}

/// The end instant an event defines for itself: DTEND, else DTSTART plus
/// its DURATION, else its start (zero length).
fn own_end<E: EventSource>(event: &E, start: DateTime<Utc>, reference: Tz) -> DateTime<Utc> {
    if let Some(end) = event.end() {
        return end.resolve(reference);
    }
    if let Some(duration) = event.duration() {
        return start + duration;
    }
    start
}

/// The master's occurrence length: DTEND minus DTSTART, else its explicit
/// DURATION, else zero.
fn master_duration<E: EventSource>(
    master: &E,
    start: DateTime<Utc>,
    reference: Tz,
) -> Duration {
    if let Some(end) = master.end() {
        return end.resolve(reference) - start;
    }
    master.duration().unwrap_or_else(Duration::zero)
}
