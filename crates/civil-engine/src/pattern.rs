//! Date-field pattern compilation.
//!
//! Patterns are written with date-field letters (`yyyy-MM-dd HH:mm:ss`
//! style) and compiled into [`chrono::format::Item`] sequences that the
//! format and parse families share. A letter run selects a field, its
//! length selects the rendering (`M` → unpadded month, `MM` → padded,
//! `MMM` → short name, `MMMM` → full name); everything else passes
//! through as a literal, with `'…'` quoting to embed letters and `''`
//! for a literal apostrophe.
//!
//! Supported field letters: `y` (year, `yy` = two-digit), `M` (month),
//! `d` (day), `H` (hour 0-23), `h` (hour 1-12, needs `a` to parse),
//! `m` (minute), `s` (second), `a` (AM/PM), `E` (weekday name). Any
//! other letter is rejected at compile time — an unsupported field is
//! an [`CalendarError::InvalidFormatPattern`], never a silent literal.

use std::fmt;
use std::fmt::Write as _;

use chrono::format::{Fixed, Item, Numeric, Pad, Parsed};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;

use crate::error::{CalendarError, Result};
use crate::{DEFAULT_DATETIME_PATTERN, DEFAULT_DATE_PATTERN, DEFAULT_TIME_PATTERN};

/// Compiled items for [`DEFAULT_DATE_PATTERN`].
pub(crate) static DATE_ITEMS: Lazy<Vec<Item<'static>>> =
    Lazy::new(|| compile(DEFAULT_DATE_PATTERN).expect("default date pattern compiles"));

/// Compiled items for [`DEFAULT_DATETIME_PATTERN`].
pub(crate) static DATETIME_ITEMS: Lazy<Vec<Item<'static>>> =
    Lazy::new(|| compile(DEFAULT_DATETIME_PATTERN).expect("default date-time pattern compiles"));

/// Compiled items for [`DEFAULT_TIME_PATTERN`].
pub(crate) static TIME_ITEMS: Lazy<Vec<Item<'static>>> =
    Lazy::new(|| compile(DEFAULT_TIME_PATTERN).expect("default time pattern compiles"));

/// Compile a date-field pattern into chrono format items.
pub(crate) fn compile(pattern: &str) -> Result<Vec<Item<'_>>> {
    let mut items = Vec::new();
    let mut rest = pattern;

    while let Some(ch) = rest.chars().next() {
        if ch.is_ascii_alphabetic() {
            let len = rest.chars().take_while(|&c| c == ch).count();
            items.push(field_item(ch, len, pattern)?);
            rest = &rest[len..];
        } else if ch == '\'' {
            let body = &rest[1..];
            let Some(end) = body.find('\'') else {
                return Err(CalendarError::InvalidFormatPattern(format!(
                    "unterminated quote in '{pattern}'"
                )));
            };
            if end == 0 {
                // '' encodes a literal apostrophe
                items.push(Item::Literal("'"));
            } else {
                items.push(Item::Literal(&body[..end]));
            }
            rest = &body[end + 1..];
        } else {
            let end = rest
                .find(|c: char| c.is_ascii_alphabetic() || c == '\'')
                .unwrap_or(rest.len());
            items.push(Item::Literal(&rest[..end]));
            rest = &rest[end..];
        }
    }

    Ok(items)
}

/// Map one field-letter run to its chrono item.
fn field_item(ch: char, len: usize, pattern: &str) -> Result<Item<'static>> {
    let item = match (ch, len) {
        ('y', 2) => Item::Numeric(Numeric::YearMod100, Pad::Zero),
        ('y', _) => Item::Numeric(Numeric::Year, Pad::Zero),
        ('M', 1) => Item::Numeric(Numeric::Month, Pad::None),
        ('M', 2) => Item::Numeric(Numeric::Month, Pad::Zero),
        ('M', 3) => Item::Fixed(Fixed::ShortMonthName),
        ('M', _) => Item::Fixed(Fixed::LongMonthName),
        ('d', 1) => Item::Numeric(Numeric::Day, Pad::None),
        ('d', _) => Item::Numeric(Numeric::Day, Pad::Zero),
        ('H', 1) => Item::Numeric(Numeric::Hour, Pad::None),
        ('H', _) => Item::Numeric(Numeric::Hour, Pad::Zero),
        ('h', 1) => Item::Numeric(Numeric::Hour12, Pad::None),
        ('h', _) => Item::Numeric(Numeric::Hour12, Pad::Zero),
        ('m', 1) => Item::Numeric(Numeric::Minute, Pad::None),
        ('m', _) => Item::Numeric(Numeric::Minute, Pad::Zero),
        ('s', 1) => Item::Numeric(Numeric::Second, Pad::None),
        ('s', _) => Item::Numeric(Numeric::Second, Pad::Zero),
        ('a', _) => Item::Fixed(Fixed::UpperAmPm),
        ('E', n) if n <= 3 => Item::Fixed(Fixed::ShortWeekdayName),
        ('E', _) => Item::Fixed(Fixed::LongWeekdayName),
        _ => {
            return Err(CalendarError::InvalidFormatPattern(format!(
                "unsupported field '{ch}' in '{pattern}'"
            )));
        }
    };
    Ok(item)
}

/// Render a delayed format, surfacing fields the value cannot supply.
pub(crate) fn render(value: impl fmt::Display, pattern: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{value}").map_err(|_| {
        CalendarError::InvalidFormatPattern(format!(
            "'{pattern}' has fields this value cannot supply"
        ))
    })?;
    Ok(out)
}

/// Run the chrono parser over `s` with the given items.
pub(crate) fn parse_fields(s: &str, items: &[Item<'_>]) -> Result<Parsed> {
    let mut parsed = Parsed::new();
    chrono::format::parse(&mut parsed, s, items.iter())
        .map_err(|e| CalendarError::DateParseFailure(format!("'{s}': {e}")))?;
    Ok(parsed)
}

/// Extract a civil date from parsed fields.
pub(crate) fn parsed_date(parsed: &Parsed, s: &str) -> Result<NaiveDate> {
    parsed
        .to_naive_date()
        .map_err(|e| CalendarError::DateParseFailure(format!("'{s}': {e}")))
}

/// Extract a time-of-day from parsed fields.
pub(crate) fn parsed_time(parsed: &Parsed, s: &str) -> Result<NaiveTime> {
    parsed
        .to_naive_time()
        .map_err(|e| CalendarError::DateParseFailure(format!("'{s}': {e}")))
}

/// Extract a civil date-time from parsed fields.
pub(crate) fn parsed_datetime(parsed: &Parsed, s: &str) -> Result<NaiveDateTime> {
    Ok(NaiveDateTime::new(
        parsed_date(parsed, s)?,
        parsed_time(parsed, s)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_compile_default_patterns() {
        assert_eq!(DATE_ITEMS.len(), 5); // yyyy - MM - dd
        assert_eq!(DATETIME_ITEMS.len(), 11);
        assert_eq!(TIME_ITEMS.len(), 5);
    }

    #[test]
    fn test_unsupported_field_rejected() {
        let err = compile("yyyy-QQ").unwrap_err();
        assert!(matches!(err, CalendarError::InvalidFormatPattern(_)));
        let msg = err.to_string();
        assert!(msg.contains("unsupported field 'Q'"), "got: {msg}");
    }

    #[test]
    fn test_unterminated_quote_rejected() {
        let err = compile("yyyy 'week").unwrap_err();
        assert!(matches!(err, CalendarError::InvalidFormatPattern(_)));
    }

    #[test]
    fn test_quoted_literal_shields_field_letters() {
        let items = compile("'day' dd").unwrap();
        let rendered = render(sample_date().format_with_items(items.iter()), "'day' dd").unwrap();
        assert_eq!(rendered, "day 01");
    }

    #[test]
    fn test_double_quote_is_apostrophe() {
        let items = compile("dd''").unwrap();
        let rendered = render(sample_date().format_with_items(items.iter()), "dd''").unwrap();
        assert_eq!(rendered, "01'");
    }

    #[test]
    fn test_single_letter_fields_unpadded() {
        let items = compile("d/M/yyyy").unwrap();
        let rendered = render(sample_date().format_with_items(items.iter()), "d/M/yyyy").unwrap();
        assert_eq!(rendered, "1/3/2024");
    }

    #[test]
    fn test_month_and_weekday_names() {
        let items = compile("EEE, dd MMM yyyy").unwrap();
        let rendered = render(
            sample_date().format_with_items(items.iter()),
            "EEE, dd MMM yyyy",
        )
        .unwrap();
        assert_eq!(rendered, "Fri, 01 Mar 2024");
    }

    #[test]
    fn test_render_rejects_time_fields_for_date() {
        let items = compile("HH:mm").unwrap();
        let result = render(sample_date().format_with_items(items.iter()), "HH:mm");
        assert!(matches!(
            result,
            Err(CalendarError::InvalidFormatPattern(_))
        ));
    }

    #[test]
    fn test_parse_fields_requires_full_consumption() {
        let err = parse_fields("2024-03-01 extra", &DATE_ITEMS).unwrap_err();
        assert!(matches!(err, CalendarError::DateParseFailure(_)));
    }
}
