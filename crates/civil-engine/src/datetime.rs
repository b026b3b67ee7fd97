//! Civil date-time operations.
//!
//! The second-precision surface over [`chrono::NaiveDateTime`]. Same
//! absence contract as [`crate::date`]: `None` propagates, `0` for
//! differences, and only [`compare_datetimes`] errors on absence.

use std::cmp::Ordering;

use chrono::{Duration, Months, NaiveDateTime};

use crate::error::{CalendarError, Result};
use crate::pattern;

// ── Formatting ──────────────────────────────────────────────────────────────

/// Format a civil date-time with
/// [`DEFAULT_DATETIME_PATTERN`](crate::DEFAULT_DATETIME_PATTERN).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use civil_engine::datetime::format_datetime;
///
/// let dt = NaiveDate::from_ymd_opt(2024, 3, 1)
///     .and_then(|d| d.and_hms_opt(9, 30, 5));
/// assert_eq!(format_datetime(dt).as_deref(), Some("2024-03-01 09:30:05"));
/// assert_eq!(format_datetime(None), None);
/// ```
pub fn format_datetime(datetime: Option<NaiveDateTime>) -> Option<String> {
    datetime.map(|dt| {
        dt.format_with_items(pattern::DATETIME_ITEMS.iter())
            .to_string()
    })
}

/// Format a civil date-time with an explicit pattern.
///
/// An absent or empty pattern falls back to the default; an absent
/// value short-circuits to `Ok(None)` before the pattern is touched.
///
/// # Errors
///
/// [`CalendarError::InvalidFormatPattern`] if the pattern does not
/// compile.
pub fn format_datetime_with(
    datetime: Option<NaiveDateTime>,
    fmt: Option<&str>,
) -> Result<Option<String>> {
    let Some(dt) = datetime else { return Ok(None) };
    match fmt.filter(|p| !p.is_empty()) {
        Some(p) => {
            let items = pattern::compile(p)?;
            pattern::render(dt.format_with_items(items.iter()), p).map(Some)
        }
        None => Ok(format_datetime(Some(dt))),
    }
}

// ── Parsing ─────────────────────────────────────────────────────────────────

/// Parse a civil date-time with
/// [`DEFAULT_DATETIME_PATTERN`](crate::DEFAULT_DATETIME_PATTERN).
///
/// Absent or empty input yields `Ok(None)`.
///
/// # Errors
///
/// [`CalendarError::DateParseFailure`] when a non-empty input does not
/// conform to the pattern or encodes an impossible value.
pub fn parse_datetime(value: Option<&str>) -> Result<Option<NaiveDateTime>> {
    parse_datetime_with(value, None)
}

/// Parse a civil date-time with an explicit pattern.
///
/// The pattern must encode at least a full date and hour/minute;
/// seconds default to zero when the pattern omits them.
///
/// # Errors
///
/// [`CalendarError::InvalidFormatPattern`] for a bad pattern,
/// [`CalendarError::DateParseFailure`] for non-conforming input.
pub fn parse_datetime_with(
    value: Option<&str>,
    fmt: Option<&str>,
) -> Result<Option<NaiveDateTime>> {
    let Some(s) = value else { return Ok(None) };
    if s.is_empty() {
        return Ok(None);
    }
    let parsed = match fmt.filter(|p| !p.is_empty()) {
        Some(p) => pattern::parse_fields(s, &pattern::compile(p)?)?,
        None => pattern::parse_fields(s, &pattern::DATETIME_ITEMS)?,
    };
    pattern::parsed_datetime(&parsed, s).map(Some)
}

// ── Comparison ──────────────────────────────────────────────────────────────

/// Three-way chronological comparison.
///
/// # Errors
///
/// [`CalendarError::NullArgument`] if either operand is `None`.
pub fn compare_datetimes(
    a: Option<NaiveDateTime>,
    b: Option<NaiveDateTime>,
) -> Result<Ordering> {
    match (a, b) {
        (Some(a), Some(b)) => Ok(a.cmp(&b)),
        _ => Err(CalendarError::NullArgument(
            "compare_datetimes requires both operands".to_string(),
        )),
    }
}

// ── Arithmetic ──────────────────────────────────────────────────────────────

/// Add whole years (negative subtracts), clamping Feb 29 when needed.
pub fn plus_years(datetime: Option<NaiveDateTime>, years: i64) -> Option<NaiveDateTime> {
    datetime.and_then(|dt| shift_months(dt, years.checked_mul(12)?))
}

/// Add whole months with end-of-month clamping.
pub fn plus_months(datetime: Option<NaiveDateTime>, months: i64) -> Option<NaiveDateTime> {
    datetime.and_then(|dt| shift_months(dt, months))
}

/// Add whole days.
pub fn plus_days(datetime: Option<NaiveDateTime>, days: i64) -> Option<NaiveDateTime> {
    datetime.and_then(|dt| dt.checked_add_signed(Duration::try_days(days)?))
}

/// Add whole hours, rolling over day boundaries.
pub fn plus_hours(datetime: Option<NaiveDateTime>, hours: i64) -> Option<NaiveDateTime> {
    datetime.and_then(|dt| dt.checked_add_signed(Duration::try_hours(hours)?))
}

/// Add whole minutes.
pub fn plus_minutes(datetime: Option<NaiveDateTime>, minutes: i64) -> Option<NaiveDateTime> {
    datetime.and_then(|dt| dt.checked_add_signed(Duration::try_minutes(minutes)?))
}

/// Add whole seconds.
pub fn plus_seconds(datetime: Option<NaiveDateTime>, seconds: i64) -> Option<NaiveDateTime> {
    datetime.and_then(|dt| dt.checked_add_signed(Duration::try_seconds(seconds)?))
}

/// Subtract whole years.
pub fn minus_years(datetime: Option<NaiveDateTime>, years: i64) -> Option<NaiveDateTime> {
    plus_years(datetime, years.checked_neg()?)
}

/// Subtract whole months.
pub fn minus_months(datetime: Option<NaiveDateTime>, months: i64) -> Option<NaiveDateTime> {
    plus_months(datetime, months.checked_neg()?)
}

/// Subtract whole days.
pub fn minus_days(datetime: Option<NaiveDateTime>, days: i64) -> Option<NaiveDateTime> {
    plus_days(datetime, days.checked_neg()?)
}

/// Subtract whole hours.
pub fn minus_hours(datetime: Option<NaiveDateTime>, hours: i64) -> Option<NaiveDateTime> {
    plus_hours(datetime, hours.checked_neg()?)
}

/// Subtract whole minutes.
pub fn minus_minutes(datetime: Option<NaiveDateTime>, minutes: i64) -> Option<NaiveDateTime> {
    plus_minutes(datetime, minutes.checked_neg()?)
}

/// Subtract whole seconds.
pub fn minus_seconds(datetime: Option<NaiveDateTime>, seconds: i64) -> Option<NaiveDateTime> {
    plus_seconds(datetime, seconds.checked_neg()?)
}

/// Calendar-month shift with end-of-month clamping.
fn shift_months(datetime: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let mag = u32::try_from(months.unsigned_abs()).ok()?;
    if months >= 0 {
        datetime.checked_add_months(Months::new(mag))
    } else {
        datetime.checked_sub_months(Months::new(mag))
    }
}

// ── Difference ──────────────────────────────────────────────────────────────

/// Whole 24-hour units from `start` to `end`, truncating toward zero.
/// `0` when either operand is absent.
pub fn days_between(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> i64 {
    match (start, end) {
        (Some(s), Some(e)) => e.signed_duration_since(s).num_days(),
        _ => 0,
    }
}

/// Whole hours from `start` to `end`. `0` when either operand is absent.
pub fn hours_between(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> i64 {
    match (start, end) {
        (Some(s), Some(e)) => e.signed_duration_since(s).num_hours(),
        _ => 0,
    }
}

/// Whole minutes from `start` to `end`. `0` when either operand is absent.
pub fn minutes_between(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> i64 {
    match (start, end) {
        (Some(s), Some(e)) => e.signed_duration_since(s).num_minutes(),
        _ => 0,
    }
}

/// Whole seconds from `start` to `end`. `0` when either operand is absent.
pub fn seconds_between(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> i64 {
    match (start, end) {
        (Some(s), Some(e)) => e.signed_duration_since(s).num_seconds(),
        _ => 0,
    }
}
