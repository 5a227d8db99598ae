//! Read-only access to one VEVENT.
//!
//! [`EventSource`] is the narrow capability set the engine needs from a
//! calendar component. Classification, expansion, and projection are
//! written against this trait, which keeps them decoupled from the
//! `icalendar` crate; [`IcsEvent`] is the adapter for it.

use calflat_core::Mailbox;
use chrono::Duration;
use icalendar::{Component, Event, EventLike};

use crate::stamp::{parse_duration, RawStamp};

/// The property set the engine reads from a VEVENT-like component.
///
/// All accessors are optional: malformed feeds routinely omit properties,
/// and the classifier decides what is fatal for a component.
pub trait EventSource {
    /// The UID property.
    fn uid(&self) -> Option<&str>;
    /// The DTSTART property.
    fn start(&self) -> Option<RawStamp>;
    /// The DTEND property.
    fn end(&self) -> Option<RawStamp>;
    /// The DURATION property.
    fn duration(&self) -> Option<Duration>;
    /// The serialized RRULE text, verbatim as it appeared in the feed.
    ///
    /// Verbatim access matters: the sanitizer repairs the raw text before
    /// it is re-parsed by the expansion engine.
    fn rrule(&self) -> Option<&str>;
    /// The RECURRENCE-ID property, present only on override instances.
    fn recurrence_id(&self) -> Option<RawStamp>;
    /// All EXDATE values, across properties and comma-separated lists.
    fn exdates(&self) -> Vec<RawStamp>;
    /// The SUMMARY property.
    fn summary(&self) -> Option<&str>;
    /// The DESCRIPTION property.
    fn description(&self) -> Option<&str>;
    /// The LOCATION property.
    fn location(&self) -> Option<&str>;
    /// The ORGANIZER property with its CN parameter.
    fn organizer(&self) -> Option<Mailbox>;
    /// All ATTENDEE properties with their CN parameters, in feed order.
    fn attendees(&self) -> Vec<Mailbox>;
    /// The vendor conferencing extension (`X-GOOGLE-CONFERENCE`).
    fn conference(&self) -> Option<&str>;
}

/// [`EventSource`] adapter over an `icalendar` VEVENT.
#[derive(Debug, Clone)]
pub struct IcsEvent {
    event: Event,
}

impl IcsEvent {
    /// Wraps a parsed VEVENT.
    pub fn new(event: Event) -> Self {
        Self { event }
    }

    /// Parses a dated property (RECURRENCE-ID, EXDATE entries) honoring its
    /// TZID parameter.
    fn stamp_property(&self, key: &str) -> Option<RawStamp> {
        let property = self.event.properties().get(key)?;
        let tzid = property.params().get("TZID").map(|p| p.value());
        RawStamp::parse(property.value(), tzid)
    }
}

impl EventSource for IcsEvent {
    fn uid(&self) -> Option<&str> {
        self.event.get_uid()
    }

    fn start(&self) -> Option<RawStamp> {
        self.event.get_start().map(RawStamp::from)
    }

    fn end(&self) -> Option<RawStamp> {
        self.event.get_end().map(RawStamp::from)
    }

    fn duration(&self) -> Option<Duration> {
        parse_duration(self.event.property_value("DURATION")?)
    }

    fn rrule(&self) -> Option<&str> {
        self.event.property_value("RRULE")
    }

    fn recurrence_id(&self) -> Option<RawStamp> {
        self.stamp_property("RECURRENCE-ID")
    }

    fn exdates(&self) -> Vec<RawStamp> {
        let Some(properties) = self.event.multi_properties().get("EXDATE") else {
            return Vec::new();
        };
        properties
            .iter()
            .flat_map(|property| {
                let tzid = property.params().get("TZID").map(|p| p.value());
                property
                    .value()
                    .split(',')
                    .filter_map(|value| RawStamp::parse(value, tzid))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn summary(&self) -> Option<&str> {
        self.event.get_summary()
    }

    fn description(&self) -> Option<&str> {
        self.event.get_description()
    }

    fn location(&self) -> Option<&str> {
        self.event.get_location()
    }

    fn organizer(&self) -> Option<Mailbox> {
        let property = self.event.properties().get("ORGANIZER")?;
        let name = property.params().get("CN").map(|p| p.value());
        Some(Mailbox::from_parts(name, property.value()))
    }

    fn attendees(&self) -> Vec<Mailbox> {
        let Some(properties) = self.event.multi_properties().get("ATTENDEE") else {
            return Vec::new();
        };
        properties
            .iter()
            .map(|property| {
                let name = property.params().get("CN").map(|p| p.value());
                Mailbox::from_parts(name, property.value())
            })
            .collect()
    }

    fn conference(&self) -> Option<&str> {
        self.event.property_value("X-GOOGLE-CONFERENCE")
    }
}
