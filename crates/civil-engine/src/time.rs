//! Time-of-day formatting and parsing.

use chrono::NaiveTime;

use crate::error::Result;
use crate::pattern;

/// Format a time-of-day with [`DEFAULT_TIME_PATTERN`](crate::DEFAULT_TIME_PATTERN).
pub fn format_time(time: Option<NaiveTime>) -> Option<String> {
    time.map(|t| t.format_with_items(pattern::TIME_ITEMS.iter()).to_string())
}

/// Format a time-of-day with an explicit pattern.
///
/// Same contract as the other format families: absent value →
/// `Ok(None)` before the pattern is touched; absent or empty pattern →
/// default.
///
/// # Errors
///
/// [`CalendarError::InvalidFormatPattern`](crate::CalendarError::InvalidFormatPattern)
/// if the pattern does not compile or needs date fields.
pub fn format_time_with(time: Option<NaiveTime>, fmt: Option<&str>) -> Result<Option<String>> {
    let Some(t) = time else { return Ok(None) };
    match fmt.filter(|p| !p.is_empty()) {
        Some(p) => {
            let items = pattern::compile(p)?;
            pattern::render(t.format_with_items(items.iter()), p).map(Some)
        }
        None => Ok(format_time(Some(t))),
    }
}

/// Parse a time-of-day with [`DEFAULT_TIME_PATTERN`](crate::DEFAULT_TIME_PATTERN).
///
/// # Errors
///
/// [`CalendarError::DateParseFailure`](crate::CalendarError::DateParseFailure)
/// when a non-empty input does not conform.
pub fn parse_time(value: Option<&str>) -> Result<Option<NaiveTime>> {
    parse_time_with(value, None)
}

/// Parse a time-of-day with an explicit pattern.
pub fn parse_time_with(value: Option<&str>, fmt: Option<&str>) -> Result<Option<NaiveTime>> {
    let Some(s) = value else { return Ok(None) };
    if s.is_empty() {
        return Ok(None);
    }
    let parsed = match fmt.filter(|p| !p.is_empty()) {
        Some(p) => pattern::parse_fields(s, &pattern::compile(p)?)?,
        None => pattern::parse_fields(s, &pattern::TIME_ITEMS)?,
    };
    pattern::parsed_time(&parsed, s).map(Some)
}
