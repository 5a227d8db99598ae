//! One-shot conversion pipeline.
//!
//! Parses an iCalendar document, classifies its VEVENTs, expands
//! recurrences inside the window, projects every occurrence into an
//! output record and returns the sorted, deduplicated result. Each call
//! is independent; no state survives between runs.

use calflat_core::{sort_and_dedup, ConferenceFinder, ExpansionWindow, OutputRecord};
use chrono::Utc;
use chrono_tz::Tz;
use icalendar::{Calendar, CalendarComponent};
use tracing::{debug, info};

use crate::classify::classify;
use crate::component::IcsEvent;
use crate::error::{ConvertError, ConvertResult};
use crate::expand::expand;
use crate::project::project;

/// Knobs for one conversion run.
#[derive(Debug)]
pub struct ConvertOptions {
    /// Timezone all local date and time fields are rendered in. Floating
    /// timestamps are interpreted in this zone too.
    pub reference: Tz,
    /// Expansion window, inclusive on both ends.
    pub window: ExpansionWindow,
    /// Conference link patterns, tried in order.
    pub finder: ConferenceFinder,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            reference: chrono_tz::Asia::Ho_Chi_Minh,
            window: ExpansionWindow::default_around(Utc::now()),
            finder: ConferenceFinder::default(),
        }
    }
}

/// Converts one iCalendar document into flat output records.
///
/// Only an unparseable document is fatal. Events without a start and
/// masters with rules the expander rejects are logged and skipped, so one
/// broken event never sinks the rest of the feed.
pub fn convert_calendar(ics: &str, options: &ConvertOptions) -> ConvertResult<Vec<OutputRecord>> {
    let calendar: Calendar = ics.parse().map_err(ConvertError::Calendar)?;

    // The parser is lenient: non-calendar text yields an empty Calendar
    // instead of an error. A real export always carries calendar-level
    // properties (VERSION, PRODID), so a fully empty result means the
    // input was not a calendar.
    if calendar.components.is_empty() && calendar.properties.is_empty() {
        return Err(ConvertError::Calendar(
            "no calendar content found".to_string(),
        ));
    }

    let events: Vec<IcsEvent> = calendar
        .iter()
        .filter_map(|component| match component {
            CalendarComponent::Event(event) => Some(IcsEvent::new(event.clone())),
            _ => None,
        })
        .collect();
    debug!(events = events.len(), "Parsed calendar");

    let classified = classify(events, options.reference);
    let occurrences = expand(&classified, options.window, options.reference);

    let records = occurrences
        .iter()
        .map(|occurrence| project(occurrence, options.reference, &options.finder))
        .collect();
    let records = sort_and_dedup(records);
    info!(records = records.len(), "Converted calendar");

    Ok(records)
}
