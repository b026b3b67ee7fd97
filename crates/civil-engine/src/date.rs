//! Civil date operations.
//!
//! The day-precision surface over [`chrono::NaiveDate`]: format/parse
//! pairs with default or explicit patterns, three-way comparison,
//! before/after/equal predicates, calendar arithmetic, day differences,
//! and month/week boundary and property queries. Everything here is
//! zone-naive — arithmetic and comparison operate purely on calendar
//! fields.
//!
//! Absence contract: `None` in means `None` out (or `false`/`0` for
//! predicates and counts). Only [`compare_dates`] treats absence as a
//! caller error.

use std::cmp::Ordering;

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

use crate::error::{CalendarError, Result};
use crate::pattern;

// ── Formatting ──────────────────────────────────────────────────────────────

/// Format a civil date with [`DEFAULT_DATE_PATTERN`](crate::DEFAULT_DATE_PATTERN).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use civil_engine::date::format_date;
///
/// let d = NaiveDate::from_ymd_opt(2024, 3, 1);
/// assert_eq!(format_date(d).as_deref(), Some("2024-03-01"));
/// assert_eq!(format_date(None), None);
/// ```
pub fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format_with_items(pattern::DATE_ITEMS.iter()).to_string())
}

/// Format a civil date with an explicit pattern.
///
/// An absent or empty pattern falls back to the default. Absence of the
/// date is checked before the pattern is touched, so
/// `format_date_with(None, Some("not a pattern"))` is `Ok(None)`.
///
/// # Errors
///
/// [`CalendarError::InvalidFormatPattern`] if the pattern does not
/// compile or asks for fields a date cannot supply (e.g. `HH`).
pub fn format_date_with(date: Option<NaiveDate>, fmt: Option<&str>) -> Result<Option<String>> {
    let Some(date) = date else { return Ok(None) };
    match fmt.filter(|p| !p.is_empty()) {
        Some(p) => {
            let items = pattern::compile(p)?;
            pattern::render(date.format_with_items(items.iter()), p).map(Some)
        }
        None => Ok(format_date(Some(date))),
    }
}

// ── Parsing ─────────────────────────────────────────────────────────────────

/// Parse a civil date with [`DEFAULT_DATE_PATTERN`](crate::DEFAULT_DATE_PATTERN).
///
/// Absent or empty input yields `Ok(None)`.
///
/// # Errors
///
/// [`CalendarError::DateParseFailure`] when a non-empty input does not
/// conform to the pattern or encodes an impossible date.
///
/// # Examples
///
/// ```
/// use civil_engine::date::parse_date;
///
/// assert!(parse_date(Some("2024-02-29")).unwrap().is_some());
/// assert!(parse_date(Some("2023-02-29")).is_err()); // not a leap year
/// assert_eq!(parse_date(Some("")).unwrap(), None);
/// ```
pub fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    parse_date_with(value, None)
}

/// Parse a civil date with an explicit pattern.
///
/// An absent or empty pattern falls back to the default; absent or
/// empty input yields `Ok(None)` before the pattern is compiled.
///
/// # Errors
///
/// [`CalendarError::InvalidFormatPattern`] for a bad pattern,
/// [`CalendarError::DateParseFailure`] for non-conforming input.
pub fn parse_date_with(value: Option<&str>, fmt: Option<&str>) -> Result<Option<NaiveDate>> {
    let Some(s) = value else { return Ok(None) };
    if s.is_empty() {
        return Ok(None);
    }
    let parsed = match fmt.filter(|p| !p.is_empty()) {
        Some(p) => pattern::parse_fields(s, &pattern::compile(p)?)?,
        None => pattern::parse_fields(s, &pattern::DATE_ITEMS)?,
    };
    pattern::parsed_date(&parsed, s).map(Some)
}

// ── Comparison ──────────────────────────────────────────────────────────────

/// Three-way chronological comparison.
///
/// Unlike the boolean predicates below, absence here is a caller error.
///
/// # Errors
///
/// [`CalendarError::NullArgument`] if either operand is `None`.
pub fn compare_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Result<Ordering> {
    match (a, b) {
        (Some(a), Some(b)) => Ok(a.cmp(&b)),
        _ => Err(CalendarError::NullArgument(
            "compare_dates requires both operands".to_string(),
        )),
    }
}

/// Whether `a` is strictly before `b`. `false` when either is absent.
pub fn is_before(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a < b)
}

/// Whether `a` is strictly after `b`. `false` when either is absent.
pub fn is_after(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a > b)
}

/// Whether `a` and `b` are the same date. `false` when either is absent.
pub fn is_equal(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

// ── Arithmetic ──────────────────────────────────────────────────────────────

/// Add whole years (negative subtracts). Feb 29 plus one year clamps to
/// Feb 28.
pub fn plus_years(date: Option<NaiveDate>, years: i64) -> Option<NaiveDate> {
    date.and_then(|d| shift_months(d, years.checked_mul(12)?))
}

/// Add whole months with end-of-month clamping: Jan 31 plus one month
/// is the last day of February.
pub fn plus_months(date: Option<NaiveDate>, months: i64) -> Option<NaiveDate> {
    date.and_then(|d| shift_months(d, months))
}

/// Add whole days (negative subtracts).
pub fn plus_days(date: Option<NaiveDate>, days: i64) -> Option<NaiveDate> {
    date.and_then(|d| d.checked_add_signed(Duration::try_days(days)?))
}

/// Subtract whole years.
pub fn minus_years(date: Option<NaiveDate>, years: i64) -> Option<NaiveDate> {
    plus_years(date, years.checked_neg()?)
}

/// Subtract whole months.
pub fn minus_months(date: Option<NaiveDate>, months: i64) -> Option<NaiveDate> {
    plus_months(date, months.checked_neg()?)
}

/// Subtract whole days.
pub fn minus_days(date: Option<NaiveDate>, days: i64) -> Option<NaiveDate> {
    plus_days(date, days.checked_neg()?)
}

/// Calendar-month shift with end-of-month clamping. Out-of-range
/// results are absent.
fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let mag = u32::try_from(months.unsigned_abs()).ok()?;
    if months >= 0 {
        date.checked_add_months(Months::new(mag))
    } else {
        date.checked_sub_months(Months::new(mag))
    }
}

// ── Difference ──────────────────────────────────────────────────────────────

/// Signed day count from `start` to `end`.
///
/// `0` when either operand is absent — callers cannot distinguish a
/// zero-length interval from missing input by the return value alone.
pub fn days_between(start: Option<NaiveDate>, end: Option<NaiveDate>) -> i64 {
    match (start, end) {
        (Some(s), Some(e)) => e.signed_duration_since(s).num_days(),
        _ => 0,
    }
}

// ── Calendar queries ────────────────────────────────────────────────────────

/// First day of the containing month.
pub fn first_day_of_month(date: Option<NaiveDate>) -> Option<NaiveDate> {
    date.and_then(|d| d.with_day(1))
}

/// Last day of the containing month: the day before the first of the
/// next month.
pub fn last_day_of_month(date: Option<NaiveDate>) -> Option<NaiveDate> {
    let d = date?;
    let (y, m) = if d.month() == 12 {
        (d.year() + 1, 1)
    } else {
        (d.year(), d.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}

/// The Monday at-or-before the given date.
pub fn first_day_of_week(date: Option<NaiveDate>) -> Option<NaiveDate> {
    let d = date?;
    let back = d.weekday().num_days_from_monday() as i64;
    d.checked_sub_signed(Duration::days(back))
}

/// The Sunday at-or-after the given date.
pub fn last_day_of_week(date: Option<NaiveDate>) -> Option<NaiveDate> {
    let d = date?;
    let ahead = 6 - d.weekday().num_days_from_monday() as i64;
    d.checked_add_signed(Duration::days(ahead))
}

/// Saturday or Sunday. `false` when absent.
pub fn is_weekend(date: Option<NaiveDate>) -> bool {
    matches!(
        date.map(|d| d.weekday()),
        Some(Weekday::Sat) | Some(Weekday::Sun)
    )
}

/// Negation of [`is_weekend`] for present dates; still `false` when
/// absent.
pub fn is_weekday(date: Option<NaiveDate>) -> bool {
    date.is_some() && !is_weekend(date)
}

/// Weekday ordinal, Monday=1 through Sunday=7. `0` when absent.
pub fn day_of_week(date: Option<NaiveDate>) -> u32 {
    date.map_or(0, |d| d.weekday().number_from_monday())
}

/// Day count of the containing month. `0` when absent.
pub fn days_in_month(date: Option<NaiveDate>) -> u32 {
    last_day_of_month(date).map_or(0, |d| d.day())
}

/// Gregorian leap-year test for a bare year number.
///
/// # Examples
///
/// ```
/// use civil_engine::date::is_leap_year;
///
/// assert!(!is_leap_year(1900)); // century, not divisible by 400
/// assert!(is_leap_year(2000));
/// assert!(is_leap_year(2024));
/// assert!(!is_leap_year(2023));
/// ```
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 1, 1).is_some_and(|d| d.leap_year())
}

/// Leap-year test for the year containing `date`. `false` when absent.
pub fn in_leap_year(date: Option<NaiveDate>) -> bool {
    date.is_some_and(|d| d.leap_year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    // ── format / parse tests ────────────────────────────────────────────

    #[test]
    fn test_format_default_pattern() {
        assert_eq!(format_date(ymd(2024, 3, 1)).as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn test_format_absent_is_absent() {
        assert_eq!(format_date(None), None);
        assert_eq!(format_date_with(None, None).unwrap(), None);
    }

    #[test]
    fn test_format_absent_wins_over_bad_pattern() {
        // Absence is checked before the pattern compiles
        assert_eq!(format_date_with(None, Some("QQQQ")).unwrap(), None);
    }

    #[test]
    fn test_format_empty_pattern_falls_back_to_default() {
        let d = ymd(2024, 3, 1);
        assert_eq!(
            format_date_with(d, Some("")).unwrap().as_deref(),
            Some("2024-03-01")
        );
        assert_eq!(
            format_date_with(d, None).unwrap().as_deref(),
            Some("2024-03-01")
        );
    }

    #[test]
    fn test_format_explicit_pattern() {
        let d = ymd(2024, 3, 1);
        assert_eq!(
            format_date_with(d, Some("dd/MM/yyyy")).unwrap().as_deref(),
            Some("01/03/2024")
        );
    }

    #[test]
    fn test_format_bad_pattern_is_error() {
        let err = format_date_with(ymd(2024, 3, 1), Some("yyyy-XX")).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidFormatPattern(_)));
    }

    #[test]
    fn test_parse_default_pattern() {
        assert_eq!(parse_date(Some("2024-03-01")).unwrap(), ymd(2024, 3, 1));
    }

    #[test]
    fn test_parse_absent_and_empty() {
        assert_eq!(parse_date(None).unwrap(), None);
        assert_eq!(parse_date(Some("")).unwrap(), None);
        // Empty input short-circuits even a bad pattern
        assert_eq!(parse_date_with(Some(""), Some("QQQQ")).unwrap(), None);
    }

    #[test]
    fn test_parse_leap_day() {
        assert_eq!(parse_date(Some("2024-02-29")).unwrap(), ymd(2024, 2, 29));
        let err = parse_date(Some("2023-02-29")).unwrap_err();
        assert!(matches!(err, CalendarError::DateParseFailure(_)));
    }

    #[test]
    fn test_parse_impossible_values() {
        assert!(parse_date(Some("2024-13-01")).is_err());
        assert!(parse_date(Some("2024-01-32")).is_err());
        assert!(parse_date(Some("2024-xx-01")).is_err());
    }

    #[test]
    fn test_parse_explicit_pattern() {
        assert_eq!(
            parse_date_with(Some("01/03/2024"), Some("dd/MM/yyyy")).unwrap(),
            ymd(2024, 3, 1)
        );
    }

    #[test]
    fn test_parse_rejects_trailing_garbage() {
        assert!(parse_date(Some("2024-03-01x")).is_err());
    }

    // ── comparison tests ────────────────────────────────────────────────

    #[test]
    fn test_compare_orders_chronologically() {
        let a = ymd(2024, 3, 1);
        let b = ymd(2024, 3, 2);
        assert_eq!(compare_dates(a, b).unwrap(), Ordering::Less);
        assert_eq!(compare_dates(b, a).unwrap(), Ordering::Greater);
        assert_eq!(compare_dates(a, a).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_compare_absent_is_error() {
        let d = ymd(2024, 3, 1);
        assert!(matches!(
            compare_dates(None, d),
            Err(CalendarError::NullArgument(_))
        ));
        assert!(matches!(
            compare_dates(d, None),
            Err(CalendarError::NullArgument(_))
        ));
    }

    #[test]
    fn test_predicates_follow_compare() {
        let a = ymd(2024, 3, 1);
        let b = ymd(2024, 3, 2);
        assert!(is_before(a, b));
        assert!(!is_before(b, a));
        assert!(is_after(b, a));
        assert!(is_equal(a, a));
        assert!(!is_equal(a, b));
    }

    #[test]
    fn test_predicates_default_false_on_absent() {
        // The comparator errors here; the predicates must not
        let d = ymd(2024, 3, 1);
        assert!(!is_before(None, d));
        assert!(!is_after(d, None));
        assert!(!is_equal(None, None));
    }

    // ── arithmetic tests ────────────────────────────────────────────────

    #[test]
    fn test_plus_days_crosses_month() {
        assert_eq!(plus_days(ymd(2024, 2, 28), 2), ymd(2024, 3, 1));
        assert_eq!(plus_days(ymd(2023, 2, 28), 2), ymd(2023, 3, 2));
    }

    #[test]
    fn test_plus_months_clamps_to_month_end() {
        // Jan 31 + 1 month = last day of February
        assert_eq!(plus_months(ymd(2024, 1, 31), 1), ymd(2024, 2, 29));
        assert_eq!(plus_months(ymd(2023, 1, 31), 1), ymd(2023, 2, 28));
    }

    #[test]
    fn test_plus_years_clamps_leap_day() {
        assert_eq!(plus_years(ymd(2024, 2, 29), 1), ymd(2025, 2, 28));
    }

    #[test]
    fn test_negative_amounts_subtract() {
        assert_eq!(plus_days(ymd(2024, 3, 1), -1), ymd(2024, 2, 29));
        assert_eq!(plus_months(ymd(2024, 3, 31), -1), ymd(2024, 2, 29));
    }

    #[test]
    fn test_minus_mirrors_plus() {
        assert_eq!(minus_days(ymd(2024, 3, 1), 1), ymd(2024, 2, 29));
        assert_eq!(minus_months(ymd(2024, 3, 31), 1), ymd(2024, 2, 29));
        assert_eq!(minus_years(ymd(2024, 2, 29), 4), ymd(2020, 2, 29));
    }

    #[test]
    fn test_arithmetic_absent_propagates() {
        assert_eq!(plus_days(None, 5), None);
        assert_eq!(minus_years(None, 1), None);
    }

    #[test]
    fn test_arithmetic_overflow_is_absent() {
        assert_eq!(plus_days(ymd(2024, 3, 1), i64::MAX), None);
        assert_eq!(plus_years(ymd(2024, 3, 1), i64::MAX), None);
        assert_eq!(minus_days(ymd(2024, 3, 1), i64::MIN), None);
    }

    // ── difference tests ────────────────────────────────────────────────

    #[test]
    fn test_days_between_signed() {
        let a = ymd(2024, 3, 1);
        let b = ymd(2024, 3, 11);
        assert_eq!(days_between(a, b), 10);
        assert_eq!(days_between(b, a), -10);
        assert_eq!(days_between(a, a), 0);
    }

    #[test]
    fn test_days_between_crosses_leap_day() {
        assert_eq!(days_between(ymd(2024, 2, 28), ymd(2024, 3, 1)), 2);
        assert_eq!(days_between(ymd(2023, 2, 28), ymd(2023, 3, 1)), 1);
    }

    #[test]
    fn test_days_between_absent_is_zero() {
        assert_eq!(days_between(None, ymd(2024, 3, 1)), 0);
        assert_eq!(days_between(ymd(2024, 3, 1), None), 0);
    }

    // ── calendar query tests ────────────────────────────────────────────

    #[test]
    fn test_month_boundaries() {
        let d = ymd(2024, 2, 15);
        assert_eq!(first_day_of_month(d), ymd(2024, 2, 1));
        assert_eq!(last_day_of_month(d), ymd(2024, 2, 29));
        // December rolls the year for the next-month computation
        assert_eq!(last_day_of_month(ymd(2024, 12, 5)), ymd(2024, 12, 31));
    }

    #[test]
    fn test_week_boundaries() {
        // Fri 2024-03-01 → week runs Mon Feb 26 to Sun Mar 3
        let d = ymd(2024, 3, 1);
        assert_eq!(first_day_of_week(d), ymd(2024, 2, 26));
        assert_eq!(last_day_of_week(d), ymd(2024, 3, 3));
        // A Monday and a Sunday are their own boundaries
        assert_eq!(first_day_of_week(ymd(2024, 2, 26)), ymd(2024, 2, 26));
        assert_eq!(last_day_of_week(ymd(2024, 3, 3)), ymd(2024, 3, 3));
    }

    #[test]
    fn test_boundary_queries_absent() {
        assert_eq!(first_day_of_month(None), None);
        assert_eq!(last_day_of_week(None), None);
    }

    #[test]
    fn test_weekend_weekday() {
        assert!(is_weekend(ymd(2024, 3, 2))); // Saturday
        assert!(is_weekend(ymd(2024, 3, 3))); // Sunday
        assert!(is_weekday(ymd(2024, 3, 1))); // Friday
        assert!(!is_weekend(None));
        assert!(!is_weekday(None));
    }

    #[test]
    fn test_day_of_week_ordinals() {
        assert_eq!(day_of_week(ymd(2024, 2, 26)), 1); // Monday
        assert_eq!(day_of_week(ymd(2024, 3, 1)), 5); // Friday
        assert_eq!(day_of_week(ymd(2024, 3, 3)), 7); // Sunday
        assert_eq!(day_of_week(None), 0);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(ymd(2024, 2, 10)), 29);
        assert_eq!(days_in_month(ymd(2023, 2, 10)), 28);
        assert_eq!(days_in_month(ymd(2024, 4, 10)), 30);
        assert_eq!(days_in_month(None), 0);
    }

    #[test]
    fn test_leap_year_rules() {
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(in_leap_year(ymd(2024, 6, 1)));
        assert!(!in_leap_year(ymd(2023, 6, 1)));
        assert!(!in_leap_year(None));
    }

    #[test]
    fn test_first_day_plus_length_reaches_last_day() {
        let d = ymd(2024, 2, 15);
        let first = first_day_of_month(d);
        let len = days_in_month(d) as i64;
        assert_eq!(plus_days(first, len - 1), last_day_of_month(d));
    }

    // ── properties ──────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn prop_format_parse_round_trip(y in 1i32..=9999, m in 1u32..=12, d in 1u32..=28) {
            let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            let text = format_date(Some(date)).unwrap();
            prop_assert_eq!(parse_date(Some(&text)).unwrap(), Some(date));
        }

        #[test]
        fn prop_compare_antisymmetric(
            a in 0i32..=100_000,
            b in 0i32..=100_000,
        ) {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
            let da = plus_days(Some(epoch), a as i64);
            let db = plus_days(Some(epoch), b as i64);
            let fwd = compare_dates(da, db).unwrap();
            let rev = compare_dates(db, da).unwrap();
            prop_assert_eq!(fwd, rev.reverse());
            prop_assert_eq!(is_before(da, db), fwd == Ordering::Less);
            prop_assert_eq!(is_after(da, db), fwd == Ordering::Greater);
        }

        #[test]
        fn prop_days_between_antisymmetric(
            a in 0i32..=100_000,
            b in 0i32..=100_000,
        ) {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
            let da = plus_days(Some(epoch), a as i64);
            let db = plus_days(Some(epoch), b as i64);
            prop_assert_eq!(days_between(da, db), -days_between(db, da));
            prop_assert_eq!(days_between(da, db), (b - a) as i64);
        }

        #[test]
        fn prop_weekday_is_not_weekend(offset in 0i32..=10_000) {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
            let d = plus_days(Some(epoch), offset as i64);
            prop_assert_eq!(is_weekday(d), !is_weekend(d));
        }
    }
}
