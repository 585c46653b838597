//! Error types for calendar and instant handling.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from calendar validation or date parsing.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// Year/month/day does not name a real Gregorian date.
    InvalidDate { year: i32, month: u32, day: u32 },
    /// Hour, minute or second outside its range.
    InvalidTimeOfDay { hour: u32, minute: u32, second: f64 },
    /// Text could not be parsed as a date or date-time.
    Parse(String),
    /// Instant is outside the range representable as a calendar date.
    OutOfRange,
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate { year, month, day } => {
                write!(f, "invalid calendar date {year:04}-{month:02}-{day:02}")
            }
            Self::InvalidTimeOfDay {
                hour,
                minute,
                second,
            } => write!(f, "invalid time of day {hour:02}:{minute:02}:{second}"),
            Self::Parse(msg) => write!(f, "date parse error: {msg}"),
            Self::OutOfRange => write!(f, "instant outside representable calendar range"),
        }
    }
}

impl Error for TimeError {}

impl From<chrono::ParseError> for TimeError {
    fn from(e: chrono::ParseError) -> Self {
        Self::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_date() {
        let e = TimeError::InvalidDate {
            year: 2017,
            month: 2,
            day: 30,
        };
        assert_eq!(e.to_string(), "invalid calendar date 2017-02-30");
    }

    #[test]
    fn from_chrono_parse_error() {
        let err = chrono::NaiveDate::parse_from_str("2017-13-01", "%Y-%m-%d").unwrap_err();
        assert!(matches!(TimeError::from(err), TimeError::Parse(_)));
    }
}
