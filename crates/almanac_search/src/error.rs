//! Error type shared by every finder.

use std::error::Error;
use std::fmt::{Display, Formatter};

use almanac_core::EphemerisError;
use almanac_time::TimeError;

/// Errors from event searches.
///
/// "Nothing found in the window" is not an error; finders return `None`
/// or a domain enum for that.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    /// The ephemeris failed while sampling.
    Ephemeris(EphemerisError),
    /// Search parameters rejected before any sampling.
    InvalidConfig(&'static str),
    Time(TimeError),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ephemeris(e) => write!(f, "ephemeris error: {e}"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Time(e) => write!(f, "time error: {e}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Ephemeris(e) => Some(e),
            Self::Time(e) => Some(e),
            Self::InvalidConfig(_) => None,
        }
    }
}

impl From<EphemerisError> for SearchError {
    fn from(e: EphemerisError) -> Self {
        Self::Ephemeris(e)
    }
}

impl From<TimeError> for SearchError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use almanac_core::Body;

    #[test]
    fn wraps_ephemeris_error() {
        let e: SearchError = EphemerisError::out_of_range(Body::Moon, 1.0).into();
        assert!(matches!(e, SearchError::Ephemeris(_)));
        assert!(e.source().is_some());
        assert!(e.to_string().starts_with("ephemeris error: moon"));
    }

    #[test]
    fn display_invalid_config() {
        let e = SearchError::InvalidConfig("step must be positive");
        assert_eq!(e.to_string(), "invalid config: step must be positive");
    }
}
