//! Current-moment accessors.
//!
//! Each function reads the host clock fresh on every call and renders
//! with the corresponding default pattern; two consecutive calls can
//! legitimately return different strings.

use chrono::Local;

use crate::pattern;

/// Current local date in [`DEFAULT_DATE_PATTERN`](crate::DEFAULT_DATE_PATTERN).
pub fn current_date() -> String {
    Local::now()
        .date_naive()
        .format_with_items(pattern::DATE_ITEMS.iter())
        .to_string()
}

/// Current local date-time in [`DEFAULT_DATETIME_PATTERN`](crate::DEFAULT_DATETIME_PATTERN).
pub fn current_datetime() -> String {
    Local::now()
        .naive_local()
        .format_with_items(pattern::DATETIME_ITEMS.iter())
        .to_string()
}

/// Current local time-of-day in [`DEFAULT_TIME_PATTERN`](crate::DEFAULT_TIME_PATTERN).
pub fn current_time() -> String {
    Local::now()
        .time()
        .format_with_items(pattern::TIME_ITEMS.iter())
        .to_string()
}
