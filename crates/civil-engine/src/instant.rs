//! Absolute instants and host-local-zone conversions.
//!
//! An instant is a [`DateTime<Utc>`] — an absolute point in time with
//! no civil fields of its own. Whenever an instant has to be related to
//! the zone-naive civil kinds, the host's local zone ([`chrono::Local`])
//! is the anchor; it is a single process-wide default, not configurable
//! per call. Formatting goes instant → local civil date-time → text;
//! parsing goes text → civil date-time → local resolution → instant.

use std::cmp::Ordering;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::{CalendarError, Result};
use crate::{date, datetime, pattern, DEFAULT_DATE_PATTERN};

// ── Formatting ──────────────────────────────────────────────────────────────

/// Format an instant with
/// [`DEFAULT_DATETIME_PATTERN`](crate::DEFAULT_DATETIME_PATTERN), after
/// converting to the host-local civil date-time.
pub fn format_instant(instant: Option<DateTime<Utc>>) -> Option<String> {
    datetime::format_datetime(to_local_datetime(instant))
}

/// Format an instant with an explicit pattern, after converting to the
/// host-local civil date-time.
///
/// # Errors
///
/// [`CalendarError::InvalidFormatPattern`] if the pattern does not
/// compile.
pub fn format_instant_with(
    instant: Option<DateTime<Utc>>,
    fmt: Option<&str>,
) -> Result<Option<String>> {
    datetime::format_datetime_with(to_local_datetime(instant), fmt)
}

// ── Parsing ─────────────────────────────────────────────────────────────────

/// Parse a string into an instant with the default patterns.
///
/// Input whose trimmed length equals the date-only default pattern's
/// length is parsed as a civil date and anchored to the local start of
/// day; anything else is parsed as a full civil date-time. Both shapes
/// of the same moment therefore resolve to the identical instant.
///
/// # Errors
///
/// [`CalendarError::DateParseFailure`] when a non-empty input does not
/// conform.
pub fn parse_instant(value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    parse_instant_with(value, None)
}

/// Parse a string into an instant, with an explicit pattern.
///
/// With no pattern (or an empty one) the length heuristic of
/// [`parse_instant`] applies. With an explicit pattern, the date-only
/// branch is chosen by comparing the *pattern string* to
/// [`DEFAULT_DATE_PATTERN`](crate::DEFAULT_DATE_PATTERN) for exact
/// equality — the input's shape is never inspected. A custom date-only
/// pattern such as `dd/MM/yyyy` therefore takes the date-time branch
/// and fails on date-only input; callers with custom date patterns
/// should go through [`date::parse_date_with`] and [`from_local_date`]
/// instead.
///
/// # Errors
///
/// [`CalendarError::InvalidFormatPattern`] for a bad pattern,
/// [`CalendarError::DateParseFailure`] for non-conforming input.
pub fn parse_instant_with(
    value: Option<&str>,
    fmt: Option<&str>,
) -> Result<Option<DateTime<Utc>>> {
    let Some(raw) = value else { return Ok(None) };
    if raw.is_empty() {
        return Ok(None);
    }
    let s = raw.trim();
    let naive = match fmt.filter(|p| !p.is_empty()) {
        None => {
            if s.len() == DEFAULT_DATE_PATTERN.len() {
                let parsed = pattern::parse_fields(s, &pattern::DATE_ITEMS)?;
                pattern::parsed_date(&parsed, s)?.and_time(NaiveTime::MIN)
            } else {
                let parsed = pattern::parse_fields(s, &pattern::DATETIME_ITEMS)?;
                pattern::parsed_datetime(&parsed, s)?
            }
        }
        Some(p) if p == DEFAULT_DATE_PATTERN => {
            let parsed = pattern::parse_fields(s, &pattern::compile(p)?)?;
            pattern::parsed_date(&parsed, s)?.and_time(NaiveTime::MIN)
        }
        Some(p) => {
            let parsed = pattern::parse_fields(s, &pattern::compile(p)?)?;
            pattern::parsed_datetime(&parsed, s)?
        }
    };
    Ok(Some(resolve_local(naive)))
}

// ── Comparison ──────────────────────────────────────────────────────────────

/// Three-way chronological comparison.
///
/// # Errors
///
/// [`CalendarError::NullArgument`] if either operand is `None`.
pub fn compare_instants(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
) -> Result<Ordering> {
    match (a, b) {
        (Some(a), Some(b)) => Ok(a.cmp(&b)),
        _ => Err(CalendarError::NullArgument(
            "compare_instants requires both operands".to_string(),
        )),
    }
}

// ── Difference ──────────────────────────────────────────────────────────────

/// Civil day difference: both instants are reduced to host-local civil
/// dates first, so two instants on the same local day differ by zero
/// regardless of their clock distance. `0` when either is absent.
pub fn days_between(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> i64 {
    date::days_between(to_local_date(start), to_local_date(end))
}

// ── Conversions ─────────────────────────────────────────────────────────────

/// The instant's civil date in the host local zone.
pub fn to_local_date(instant: Option<DateTime<Utc>>) -> Option<NaiveDate> {
    instant.map(|i| i.with_timezone(&Local).date_naive())
}

/// The instant's civil date-time in the host local zone.
pub fn to_local_datetime(instant: Option<DateTime<Utc>>) -> Option<NaiveDateTime> {
    instant.map(|i| i.with_timezone(&Local).naive_local())
}

/// The instant at the local start of day of the given civil date.
pub fn from_local_date(value: Option<NaiveDate>) -> Option<DateTime<Utc>> {
    value.map(|d| resolve_local(d.and_time(NaiveTime::MIN)))
}

/// The instant of the given civil date-time in the host local zone.
pub fn from_local_datetime(value: Option<NaiveDateTime>) -> Option<DateTime<Utc>> {
    value.map(resolve_local)
}

/// Resolve a civil date-time in the host local zone. An ambiguous wall
/// time takes the earliest mapping; a nonexistent one (DST gap) falls
/// back to reading the civil value as UTC.
fn resolve_local(naive: NaiveDateTime) -> DateTime<Utc> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
        .with_timezone(&Utc)
}
