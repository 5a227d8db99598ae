//! Timestamp normalization.
//!
//! A date value in an iCalendar feed comes in four shapes: bare date,
//! floating (timezone-naive) date-time, UTC date-time, and date-time pinned
//! to a TZID. [`RawStamp`] models all four; [`RawStamp::resolve`] turns any
//! of them into an unambiguous UTC instant. Naive values are interpreted in
//! the configured reference timezone, never silently as UTC — the feeds
//! this tool targets write local wall-clock times without a designator.
//!
//! Past this boundary the rest of the engine only ever sees
//! `DateTime<Utc>`.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{CalendarDateTime, DatePerhapsTime};
use tracing::warn;

/// A parsed-but-unresolved date or date-time value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawStamp {
    /// A bare date with no time component.
    Date(NaiveDate),
    /// A timezone-naive date-time.
    Floating(NaiveDateTime),
    /// A date-time already in UTC.
    Utc(DateTime<Utc>),
    /// A date-time local to a named timezone.
    Zoned {
        /// Local wall-clock time.
        local: NaiveDateTime,
        /// The TZID parameter value.
        tzid: String,
    },
}

impl RawStamp {
    /// Resolves this value to an absolute instant.
    ///
    /// - UTC values pass through unchanged.
    /// - Zoned values resolve via their TZID; an unknown TZID falls back to
    ///   the reference zone with a diagnostic.
    /// - Floating values are interpreted in the reference zone.
    /// - Bare dates become midnight in the reference zone.
    pub fn resolve(&self, reference: Tz) -> DateTime<Utc> {
        match self {
            Self::Utc(dt) => *dt,
            Self::Floating(naive) => resolve_local(*naive, reference),
            Self::Date(date) => {
                let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is valid");
                resolve_local(midnight, reference)
            }
            Self::Zoned { local, tzid } => match tzid.parse::<Tz>() {
                Ok(tz) => resolve_local(*local, tz),
                Err(_) => {
                    warn!(tzid = %tzid, "Unknown TZID, falling back to reference timezone");
                    resolve_local(*local, reference)
                }
            },
        }
    }

    /// The timezone this value is interpreted in.
    ///
    /// Needed by the rule sanitizer, which has to re-interpret a local
    /// UNTIL clause in the master's own start zone.
    pub fn zone_hint(&self, reference: Tz) -> Tz {
        match self {
            Self::Utc(_) => chrono_tz::UTC,
            Self::Zoned { tzid, .. } => tzid.parse().unwrap_or(reference),
            Self::Floating(_) | Self::Date(_) => reference,
        }
    }

    /// Parses an iCalendar date or date-time string.
    ///
    /// Handles the three wire forms:
    /// - `20240601T090000Z` (UTC)
    /// - `20240601T090000` (floating, or zoned when `tzid` is given)
    /// - `20240601` (bare date)
    pub fn parse(value: &str, tzid: Option<&str>) -> Option<Self> {
        let value = value.trim();

        if value.len() == 8 && value.chars().all(|c| c.is_ascii_digit()) {
            let date = NaiveDate::parse_from_str(value, "%Y%m%d").ok()?;
            return Some(Self::Date(date));
        }

        if let Some(naive) = value.strip_suffix('Z') {
            let dt = NaiveDateTime::parse_from_str(naive, "%Y%m%dT%H%M%S").ok()?;
            return Some(Self::Utc(Utc.from_utc_datetime(&dt)));
        }

        let naive = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S").ok()?;
        Some(match tzid {
            Some(tzid) => Self::Zoned {
                local: naive,
                tzid: tzid.to_string(),
            },
            None => Self::Floating(naive),
        })
    }
}

impl From<DatePerhapsTime> for RawStamp {
    fn from(dt: DatePerhapsTime) -> Self {
        match dt {
            DatePerhapsTime::Date(date) => Self::Date(date),
            DatePerhapsTime::DateTime(cdt) => match cdt {
                CalendarDateTime::Utc(dt) => Self::Utc(dt),
                CalendarDateTime::Floating(naive) => Self::Floating(naive),
                CalendarDateTime::WithTimezone { date_time, tzid } => Self::Zoned {
                    local: date_time,
                    tzid,
                },
            },
        }
    }
}

/// Attaches a timezone's offset to a naive local time.
///
/// Ambiguous local times (DST fold) take the earlier interpretation; times
/// inside a DST gap are treated as if the zone offset did not shift.
fn resolve_local(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

/// Parses an ISO 8601 duration (`PT1H30M`, `P1D`, `-PT15M`, `P2W`).
///
/// Only the day/time designators that occur in calendar feeds are
/// supported; year and month designators are rejected (RFC 5545 forbids
/// them in DURATION values anyway).
pub fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let (negative, value) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let value = value.strip_prefix('P')?;

    let (date_part, time_part) = match value.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (value, None),
    };

    let mut seconds: i64 = 0;
    accumulate(date_part, &[('W', 7 * 86_400), ('D', 86_400)], &mut seconds)?;
    if let Some(time_part) = time_part {
        accumulate(time_part, &[('H', 3_600), ('M', 60), ('S', 1)], &mut seconds)?;
    }

    let duration = Duration::seconds(seconds);
    Some(if negative { -duration } else { duration })
}

fn accumulate(part: &str, units: &[(char, i64)], seconds: &mut i64) -> Option<()> {
    let mut digits = String::new();
    for c in part.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            let scale = units.iter().find(|(unit, _)| *unit == c)?.1;
            let value: i64 = digits.parse().ok()?;
            digits.clear();
            *seconds += value * scale;
        }
    }
    // trailing digits without a designator are malformed
    if digits.is_empty() { Some(()) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAIGON: Tz = chrono_tz::Asia::Ho_Chi_Minh;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    mod parsing {
        use super::*;

        #[test]
        fn parses_utc_datetime() {
            let stamp = RawStamp::parse("20240601T090000Z", None).unwrap();
            assert_eq!(stamp, RawStamp::Utc(utc(2024, 6, 1, 9, 0, 0)));
        }

        #[test]
        fn parses_floating_datetime() {
            let stamp = RawStamp::parse("20240601T090000", None).unwrap();
            assert!(matches!(stamp, RawStamp::Floating(_)));
        }

        #[test]
        fn parses_zoned_datetime() {
            let stamp = RawStamp::parse("20240601T090000", Some("Asia/Ho_Chi_Minh")).unwrap();
            assert!(
                matches!(stamp, RawStamp::Zoned { ref tzid, .. } if tzid == "Asia/Ho_Chi_Minh")
            );
        }

        #[test]
        fn parses_bare_date() {
            let stamp = RawStamp::parse("20240601", None).unwrap();
            assert_eq!(
                stamp,
                RawStamp::Date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            );
        }

        #[test]
        fn rejects_garbage() {
            assert_eq!(RawStamp::parse("not-a-date", None), None);
            assert_eq!(RawStamp::parse("2024-06-01", None), None);
        }
    }

    mod resolution {
        use super::*;

        #[test]
        fn utc_passes_through() {
            let stamp = RawStamp::Utc(utc(2024, 6, 1, 9, 0, 0));
            assert_eq!(stamp.resolve(SAIGON), utc(2024, 6, 1, 9, 0, 0));
        }

        #[test]
        fn floating_uses_reference_zone() {
            // 09:00 in Saigon (UTC+7) is 02:00 UTC
            let stamp = RawStamp::parse("20240601T090000", None).unwrap();
            assert_eq!(stamp.resolve(SAIGON), utc(2024, 6, 1, 2, 0, 0));
        }

        #[test]
        fn bare_date_is_reference_midnight() {
            let stamp = RawStamp::parse("20240601", None).unwrap();
            assert_eq!(stamp.resolve(SAIGON), utc(2024, 5, 31, 17, 0, 0));
        }

        #[test]
        fn zoned_uses_its_own_zone() {
            let stamp = RawStamp::parse("20240601T090000", Some("Europe/Paris")).unwrap();
            // June: Paris is UTC+2
            assert_eq!(stamp.resolve(SAIGON), utc(2024, 6, 1, 7, 0, 0));
        }

        #[test]
        fn unknown_tzid_falls_back_to_reference() {
            let stamp = RawStamp::parse("20240601T090000", Some("Mars/Olympus_Mons")).unwrap();
            assert_eq!(stamp.resolve(SAIGON), utc(2024, 6, 1, 2, 0, 0));
        }

        #[test]
        fn zone_hint_matches_resolution_zone() {
            assert_eq!(
                RawStamp::parse("20240601T090000Z", None)
                    .unwrap()
                    .zone_hint(SAIGON),
                chrono_tz::UTC
            );
            assert_eq!(
                RawStamp::parse("20240601T090000", None)
                    .unwrap()
                    .zone_hint(SAIGON),
                SAIGON
            );
            assert_eq!(
                RawStamp::parse("20240601T090000", Some("Europe/Paris"))
                    .unwrap()
                    .zone_hint(SAIGON),
                chrono_tz::Europe::Paris
            );
        }
    }

    mod durations {
        use super::*;

        #[test]
        fn parses_hours_and_minutes() {
            assert_eq!(
                parse_duration("PT1H30M"),
                Some(Duration::minutes(90))
            );
        }

        #[test]
        fn parses_days_and_weeks() {
            assert_eq!(parse_duration("P1D"), Some(Duration::days(1)));
            assert_eq!(parse_duration("P2W"), Some(Duration::weeks(2)));
        }

        #[test]
        fn parses_mixed_date_and_time() {
            assert_eq!(
                parse_duration("P1DT12H"),
                Some(Duration::hours(36))
            );
        }

        #[test]
        fn parses_negative_duration() {
            assert_eq!(parse_duration("-PT15M"), Some(Duration::minutes(-15)));
        }

        #[test]
        fn rejects_malformed_durations() {
            assert_eq!(parse_duration("1H30M"), None);
            assert_eq!(parse_duration("PT90"), None);
            assert_eq!(parse_duration("P1Y"), None);
        }
    }
}
