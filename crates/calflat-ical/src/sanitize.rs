//! Recurrence rule repair.
//!
//! Two classes of malformed UNTIL clauses show up in real exports and make
//! strict RRULE parsers reject the whole rule:
//!
//! 1. A duplicated time suffix: `UNTIL=20240601T000000ZT000000Z`. Seen in
//!    feeds that went through a buggy serializer twice.
//! 2. A local-time UNTIL with no `Z` designator. RFC 5545 requires UNTIL in
//!    UTC whenever DTSTART carries a time, so the value is re-interpreted
//!    in the master's start timezone and rewritten as UTC.
//!
//! Repairs are attempted in that order; the first match wins. Anything
//! else is returned unchanged.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;

/// Matches an UNTIL token with a spurious second time suffix.
static DOUBLED_UNTIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(UNTIL=[0-9]{8}T[0-9]{6}Z)T[0-9]{6}Z").expect("doubled UNTIL regex is valid")
});

/// Matches the date or date-time portion of any UNTIL token.
static UNTIL_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"UNTIL=([0-9]{8}(?:T[0-9]{6})?)").expect("UNTIL value regex is valid")
});

/// Repairs malformed UNTIL clauses in a serialized recurrence rule.
///
/// `start_zone` is the timezone the master's DTSTART is interpreted in; a
/// designator-less UNTIL is assumed local to it.
pub fn sanitize_rrule(rule: &str, start_zone: Tz) -> String {
    if DOUBLED_UNTIL.is_match(rule) {
        return DOUBLED_UNTIL.replace(rule, "$1").into_owned();
    }

    if let Some(caps) = UNTIL_VALUE.captures(rule) {
        let token = caps.get(0).expect("group 0 always present");
        // No lookahead in the regex crate: check the char after the match
        // by hand to leave `…Z` values alone.
        if !rule[token.end()..].starts_with('Z') {
            if let Some(utc_value) = until_to_utc(&caps[1], start_zone) {
                return format!(
                    "{}UNTIL={}{}",
                    &rule[..token.start()],
                    utc_value,
                    &rule[token.end()..]
                );
            }
        }
    }

    rule.to_string()
}

/// Re-interprets a local UNTIL value in the given zone and formats it as a
/// UTC token. A bare date counts as local midnight.
fn until_to_utc(value: &str, zone: Tz) -> Option<String> {
    let naive = if value.contains('T') {
        NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S").ok()?
    } else {
        NaiveDate::parse_from_str(value, "%Y%m%d")
            .ok()?
            .and_hms_opt(0, 0, 0)?
    };
    let local = zone.from_local_datetime(&naive).earliest()?;
    Some(
        local
            .with_timezone(&Utc)
            .format("%Y%m%dT%H%M%SZ")
            .to_string(),
    )
}
