//! # civil-engine
//!
//! Null-tolerant civil date and time computation.
//!
//! Every operation is a pure, synchronous function over immutable
//! [`chrono`] values: format and parse with default or explicit
//! patterns, three-way comparison, calendar arithmetic, unit
//! differences, month/week boundary queries, and conversions between
//! civil values and absolute instants through the host's local zone.
//!
//! # Absence Policy
//!
//! Absence (`None`) is a legitimate input almost everywhere and follows
//! a two-tier policy rather than a single convention:
//!
//! - Malformed *content* is a hard error: a pattern that will not
//!   compile is [`CalendarError::InvalidFormatPattern`]; a non-empty
//!   string that will not parse is [`CalendarError::DateParseFailure`].
//! - Missing *input* is a soft default: `None` in means `None` out for
//!   format/parse/arithmetic/conversions, `false` for predicates, and
//!   `0` for counts and differences. The only exception is the
//!   three-way comparators, which return
//!   [`CalendarError::NullArgument`] — an intentional asymmetry with
//!   the boolean predicates.
//!
//! # Modules
//!
//! - [`clock`] — current date/time as default-formatted strings
//! - [`date`] — civil date formatting, parsing, comparison, arithmetic, calendar queries
//! - [`datetime`] — civil date-time operations and unit differences
//! - [`time`] — time-of-day formatting and parsing
//! - [`instant`] — absolute instants and host-local-zone conversions
//! - [`presence`] — the absence predicate
//! - [`error`] — error types
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use civil_engine::date;
//!
//! let d = date::parse_date(Some("2024-02-29")).unwrap();
//! assert_eq!(d, NaiveDate::from_ymd_opt(2024, 2, 29));
//! assert_eq!(date::format_date(d).as_deref(), Some("2024-02-29"));
//! ```

use chrono_tz::Tz;

pub mod clock;
pub mod date;
pub mod datetime;
pub mod error;
pub mod instant;
mod pattern;
pub mod presence;
pub mod time;

pub use error::{CalendarError, Result};
pub use presence::is_absent;

/// Default civil date pattern.
pub const DEFAULT_DATE_PATTERN: &str = "yyyy-MM-dd";

/// Default civil date-time pattern.
pub const DEFAULT_DATETIME_PATTERN: &str = "yyyy-MM-dd HH:mm:ss";

/// Default time-of-day pattern.
pub const DEFAULT_TIME_PATTERN: &str = "HH:mm:ss";

/// Default zone label.
///
/// Documented default only: the instant conversions in [`instant`]
/// always anchor through the host's local zone, never through this
/// constant.
pub const DEFAULT_TIME_ZONE: Tz = Tz::Asia__Shanghai;
