//! Error types for civil-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid format pattern: {0}")]
    InvalidFormatPattern(String),

    #[error("Date parse failure: {0}")]
    DateParseFailure(String),

    #[error("Null argument: {0}")]
    NullArgument(String),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
