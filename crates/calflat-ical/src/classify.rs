//! Event classification.
//!
//! One calendar's components split into three buckets: single events,
//! recurring masters, and override instances. The RECURRENCE-ID check runs
//! before the RRULE check on purpose: some exporters leave a copy of the
//! parent's rule on override instances, and those must still classify as
//! overrides.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::component::EventSource;

/// The classifier's output: per-run owned buckets, nothing shared across
/// runs.
#[derive(Debug)]
pub struct Classified<E> {
    /// Non-recurring events.
    pub singles: Vec<E>,
    /// Recurring masters by uid. Duplicate uids are tolerated,
    /// last-write-wins.
    pub masters: BTreeMap<String, E>,
    /// Override instances keyed by uid, then by the overridden instant.
    pub overrides: HashMap<String, HashMap<DateTime<Utc>, E>>,
}

impl<E> Classified<E> {
    fn empty() -> Self {
        Self {
            singles: Vec::new(),
            masters: BTreeMap::new(),
            overrides: HashMap::new(),
        }
    }

    /// Looks up the override pinned to an occurrence instant of a master.
    pub fn override_at(&self, uid: &str, instant: DateTime<Utc>) -> Option<&E> {
        self.overrides.get(uid)?.get(&instant)
    }
}

/// Partitions calendar components into singles, masters, and overrides.
///
/// Components without a start are dropped with a diagnostic — malformed
/// feeds are common and one broken event must not abort the run. The
/// reference timezone resolves each override's pinned instant.
pub fn classify<E: EventSource>(components: Vec<E>, reference: Tz) -> Classified<E> {
    let mut classified = Classified::empty();

    for component in components {
        if component.start().is_none() {
            warn!(
                uid = component.uid().unwrap_or("(none)"),
                summary = component.summary().unwrap_or("(none)"),
                "Skipping event with no start time"
            );
            continue;
        }

        let uid = component.uid().unwrap_or_default().to_string();

        if let Some(recurrence_id) = component.recurrence_id() {
            let instant = recurrence_id.resolve(reference);
            debug!(uid = %uid, instant = %instant, "Classified override instance");
            classified
                .overrides
                .entry(uid)
                .or_default()
                .insert(instant, component);
        } else if component.rrule().is_some() {
            debug!(uid = %uid, "Classified recurring master");
            classified.masters.insert(uid, component);
        } else {
            classified.singles.push(component);
        }
    }

    classified
}
